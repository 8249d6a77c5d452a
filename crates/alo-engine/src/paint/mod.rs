//! Colour values and pixel write policies.

mod mode;
mod pixel;

pub use mode::{CustomPixelFn, PixelMode};
pub use pixel::*;
