//! Textured draw instances.
//!
//! A [`Decal`] is the GPU side of a sprite. Decal draw calls produce [`DecalInstance`]s in
//! device coordinates which are queued on the target layer and replayed at the end of the
//! frame.

mod decal;
mod instance;
mod renderable;
mod warp;

pub use decal::Decal;
pub(crate) use instance::QUAD_UVS;
pub use instance::{DecalInstance, DecalMode, DecalStructure};
pub use renderable::Renderable;
pub use warp::warp_factors;
