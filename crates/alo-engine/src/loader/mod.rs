//! Image decoding into sprites.

mod image_crate;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sprite::Sprite;

pub use image_crate::ImageCrateLoader;

/// Why an image could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Nothing exists at the given path
    #[error("image file not found: {0}")]
    NoFile(PathBuf),

    /// The file exists but could not be read or decoded
    #[error("failed to load image {path}: {reason}")]
    Fail { path: PathBuf, reason: String },
}

/// Decodes image files into RGBA sprites.
pub trait ImageLoader: Send {
    /// Replaces `sprite` with the decoded contents of `path`.
    ///
    /// On failure the sprite is left empty.
    fn load_image_resource(&self, sprite: &mut Sprite, path: &Path) -> Result<(), LoadError>;

    /// Same as [`load_image_resource`](Self::load_image_resource) for an in-memory file.
    fn load_image_bytes(&self, sprite: &mut Sprite, bytes: &[u8]) -> Result<(), LoadError>;
}
