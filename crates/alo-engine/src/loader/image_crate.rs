use std::path::{Path, PathBuf};

use super::{ImageLoader, LoadError};
use crate::paint::Pixel;
use crate::sprite::Sprite;

/// [`ImageLoader`] backed by the `image` crate (PNG, JPEG, BMP, GIF, ICO, TIFF, WebP).
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateLoader;

impl ImageCrateLoader {
    pub fn new() -> Self {
        Self
    }

    fn fill(sprite: &mut Sprite, img: image::DynamicImage, origin: &Path) -> Result<(), LoadError> {
        let rgba = img.into_rgba8();
        let (w, h) = rgba.dimensions();
        let pixels: Vec<Pixel> = rgba
            .pixels()
            .map(|p| Pixel::rgba(p[0], p[1], p[2], p[3]))
            .collect();
        match Sprite::from_pixels(w as i32, h as i32, pixels) {
            Some(s) => {
                *sprite = s;
                Ok(())
            }
            None => Err(LoadError::Fail {
                path: origin.to_path_buf(),
                reason: format!("decoded size {w}x{h} does not match pixel count"),
            }),
        }
    }
}

impl ImageLoader for ImageCrateLoader {
    fn load_image_resource(&self, sprite: &mut Sprite, path: &Path) -> Result<(), LoadError> {
        sprite.reset();
        if !path.exists() {
            return Err(LoadError::NoFile(path.to_path_buf()));
        }
        let img = image::open(path).map_err(|e| LoadError::Fail {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::fill(sprite, img, path)
    }

    fn load_image_bytes(&self, sprite: &mut Sprite, bytes: &[u8]) -> Result<(), LoadError> {
        sprite.reset();
        let origin = PathBuf::from("<memory>");
        let img = image::load_from_memory(bytes).map_err(|e| LoadError::Fail {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::fill(sprite, img, &origin)
    }
}
