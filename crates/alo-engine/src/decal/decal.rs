use std::sync::mpsc::Sender;

use crate::coords::{Vec2, Vec2i};
use crate::render::{Graphics, TextureId};
use crate::sprite::Sprite;

/// A GPU texture uploaded from a sprite.
///
/// The GPU copy only changes when [`update`](Decal::update) is called. Dropping the decal
/// queues its texture for deletion; the engine frees queued textures between frames.
#[derive(Debug)]
pub struct Decal {
    id: Option<TextureId>,
    size: Vec2i,
    uv_scale: Vec2,
    release: Sender<TextureId>,
}

impl Decal {
    /// Creates a texture for `sprite` and uploads it. An empty sprite yields a decal without a
    /// texture, which draws as flat colour.
    pub fn new(gfx: &mut Graphics, sprite: &Sprite, filter: bool, clamp: bool) -> Self {
        let release = gfx.release_sender();
        if sprite.is_empty() {
            return Self {
                id: None,
                size: Vec2i::zero(),
                uv_scale: Vec2::splat(1.0),
                release,
            };
        }

        let r = gfx.renderer();
        let id = r.create_texture(sprite.width() as u32, sprite.height() as u32, filter, clamp);
        let mut decal = Self {
            id: Some(id),
            size: sprite.size(),
            uv_scale: Vec2::splat(1.0),
            release,
        };
        decal.update(gfx, sprite);
        decal
    }

    #[inline]
    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    #[inline]
    pub fn size(&self) -> Vec2i {
        self.size
    }

    /// `(1/w, 1/h)` of the source sprite at the last upload.
    #[inline]
    pub fn uv_scale(&self) -> Vec2 {
        self.uv_scale
    }

    /// Re-uploads the whole sprite.
    pub fn update(&mut self, gfx: &mut Graphics, sprite: &Sprite) {
        let Some(id) = self.id else { return };
        if sprite.is_empty() {
            return;
        }
        self.size = sprite.size();
        self.uv_scale = Vec2::new(1.0 / sprite.width() as f32, 1.0 / sprite.height() as f32);
        let r = gfx.renderer();
        r.apply_texture(id);
        r.update_texture(id, sprite);
    }

    /// Reads the GPU copy back into `sprite`.
    pub fn update_sprite(&self, gfx: &mut Graphics, sprite: &mut Sprite) {
        let Some(id) = self.id else { return };
        let r = gfx.renderer();
        r.apply_texture(id);
        r.read_texture(id, sprite);
    }
}

impl Drop for Decal {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            // The receiver is gone only once the engine itself has shut down.
            let _ = self.release.send(id);
        }
    }
}
