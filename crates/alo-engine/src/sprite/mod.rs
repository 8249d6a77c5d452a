//! CPU pixel buffers.
//!
//! A [`Sprite`] owns a `width × height` array of [`Pixel`](crate::paint::Pixel)s. Reads outside
//! the buffer never fail: the [`SampleMode`] decides what comes back. Writes outside the buffer
//! are rejected and leave it untouched.

mod sprite;

pub use sprite::{Flip, SampleMode, Sprite};
