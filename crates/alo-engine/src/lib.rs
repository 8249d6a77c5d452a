//! alo-engine: a pixel-canvas 2D engine with batched decals and layered compositing.
//!
//! The engine owns a CPU-side sprite per layer plus a queue of GPU decals per layer.
//! Each frame it composites layers back to front through a pluggable [`render::Renderer`],
//! while a [`platform::Platform`] pumps window events on the main thread.

pub mod coords;
pub mod core;
pub mod decal;
pub mod device;
pub mod draw;
pub mod font;
pub mod input;
pub mod loader;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod render;
pub mod sprite;
pub mod time;

/// The types most applications need.
pub mod prelude {
    pub use crate::coords::{Vec2, Vec2i};
    pub use crate::core::{App, Engine, EngineConfig, Extension, LayerHook};
    pub use crate::decal::{Decal, DecalMode, DecalStructure, Renderable};
    pub use crate::input::{HwButton, Key, MouseButton};
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::paint::*;
    pub use crate::sprite::{Flip, SampleMode, Sprite};
}
