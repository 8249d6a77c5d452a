//! wgpu device and window surface for [`WgpuRenderer`](crate::render::WgpuRenderer).
//!
//! Covers adapter/device selection, surface configuration and resize tracking, and
//! per-frame acquire/present with surface error recovery.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
