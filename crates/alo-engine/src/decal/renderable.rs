use std::path::Path;

use super::Decal;
use crate::loader::{ImageLoader, LoadError};
use crate::render::Graphics;
use crate::sprite::Sprite;

/// A sprite paired with the decal uploaded from it.
#[derive(Debug, Default)]
pub struct Renderable {
    sprite: Sprite,
    decal: Option<Decal>,
}

impl Renderable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `sprite` and uploads it.
    pub fn from_sprite(gfx: &mut Graphics, sprite: Sprite, filter: bool, clamp: bool) -> Self {
        let decal = Decal::new(gfx, &sprite, filter, clamp);
        Self {
            sprite,
            decal: Some(decal),
        }
    }

    /// Replaces the contents with a blank `w × h` sprite and its decal.
    pub fn create(&mut self, gfx: &mut Graphics, w: i32, h: i32, filter: bool, clamp: bool) {
        self.sprite = Sprite::new(w, h);
        self.decal = Some(Decal::new(gfx, &self.sprite, filter, clamp));
    }

    /// Loads an image file. On failure the sprite is emptied and the decal dropped.
    pub fn load(
        &mut self,
        gfx: &mut Graphics,
        loader: &dyn ImageLoader,
        path: &Path,
        filter: bool,
        clamp: bool,
    ) -> Result<(), LoadError> {
        match loader.load_image_resource(&mut self.sprite, path) {
            Ok(()) => {
                self.decal = Some(Decal::new(gfx, &self.sprite, filter, clamp));
                Ok(())
            }
            Err(e) => {
                self.sprite.reset();
                self.decal = None;
                Err(e)
            }
        }
    }

    #[inline]
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    #[inline]
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    #[inline]
    pub fn decal(&self) -> Option<&Decal> {
        self.decal.as_ref()
    }

    /// Pushes the sprite's current contents to its decal.
    pub fn update_decal(&mut self, gfx: &mut Graphics) {
        if let Some(d) = self.decal.as_mut() {
            d.update(gfx, &self.sprite);
        }
    }
}
