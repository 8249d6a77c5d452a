//! Frame timing.
//!
//! - `FrameClock` measures the delta time handed to the per-frame callback
//! - `FpsCounter` folds those deltas into a once-per-second frame rate

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
