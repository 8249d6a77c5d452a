//! Coordinate and geometry types shared by the engine, its backends and the GUI.
//!
//! Canonical CPU space:
//! - screen pixels (the logical canvas set at construction)
//! - origin top-left
//! - +X right, +Y down
//!
//! Decal geometry is converted to NDC at the moment it is queued.

mod transform;
mod vec2;
mod viewport;

pub use transform::{ndc_to_screen, screen_to_ndc};
pub use vec2::{Vec2, Vec2i};
pub use viewport::Viewport;
