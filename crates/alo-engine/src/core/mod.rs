//! The engine context and its frame loop.
//!
//! [`Engine`] owns the bound renderer, platform and image loader together with the layer
//! stack, input state and timing. Applications plug in through [`App`]; [`Extension`]s wrap
//! the application callbacks.

mod app;
mod config;
mod engine;
mod layer;
mod text_entry;

pub use app::{App, Extension};
pub use config::EngineConfig;
pub use engine::Engine;
pub use layer::{LayerDesc, LayerHook};
pub use text_entry::TextEntry;

#[cfg(test)]
mod tests;
