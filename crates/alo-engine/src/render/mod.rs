//! Rendering backends.
//!
//! The engine talks to a [`Renderer`] only. Two implementations ship with the crate:
//! - [`WgpuRenderer`] presents into a window through wgpu.
//! - [`HeadlessRenderer`] keeps textures on the CPU and records calls.
//!
//! Convention: every vertex handed to a renderer is already in NDC.

mod graphics;
mod headless;
mod renderer;
pub mod gpu;

pub use graphics::Graphics;
pub use headless::{CallLog, HeadlessRenderer, RenderCall};
pub use renderer::{DeviceTarget, Renderer, TextureId, WindowSurface};
pub use gpu::WgpuRenderer;
