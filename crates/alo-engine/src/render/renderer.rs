use std::sync::Arc;

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::coords::{Vec2, Vec2i};
use crate::decal::{DecalInstance, DecalMode};
use crate::paint::Pixel;
use crate::sprite::Sprite;

/// Opaque backend texture handle.
pub type TextureId = u32;

/// A native window a backend can present into.
pub trait WindowSurface: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Current drawable size in physical pixels.
    fn surface_size(&self) -> (u32, u32);
}

impl WindowSurface for winit::window::Window {
    fn surface_size(&self) -> (u32, u32) {
        let s = self.inner_size();
        (s.width, s.height)
    }
}

/// What a device is created against.
#[derive(Clone)]
pub struct DeviceTarget {
    /// `None` for windowless rendering.
    pub surface: Option<Arc<dyn WindowSurface>>,
    pub size: Vec2i,
}

impl std::fmt::Debug for DeviceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceTarget")
            .field("surface", &self.surface.is_some())
            .field("size", &self.size)
            .finish()
    }
}

/// GPU capability the engine drives.
///
/// Every call happens on the engine thread and completes before it returns.
pub trait Renderer: Send {
    fn prepare_device(&mut self) {}

    fn create_device(&mut self, target: DeviceTarget, full_screen: bool, vsync: bool) -> Result<()>;

    fn destroy_device(&mut self) -> Result<()>;

    /// Presents everything drawn since the last `prepare_drawing`.
    fn display_frame(&mut self);

    /// Enters the per-frame drawing state with the default blend mode.
    fn prepare_drawing(&mut self);

    fn set_decal_mode(&mut self, mode: DecalMode);

    /// Draws the currently applied texture as a full-screen quad.
    fn draw_layer_quad(&mut self, offset: Vec2, scale: Vec2, tint: Pixel);

    fn draw_decal(&mut self, decal: &DecalInstance);

    fn create_texture(&mut self, width: u32, height: u32, filtered: bool, clamp: bool) -> TextureId;

    /// Overwrites the full extent of the currently applied texture.
    fn update_texture(&mut self, id: TextureId, sprite: &Sprite);

    fn read_texture(&mut self, id: TextureId, sprite: &mut Sprite);

    /// Releases `id`. Unknown ids are ignored.
    fn delete_texture(&mut self, id: TextureId) -> TextureId;

    fn apply_texture(&mut self, id: TextureId);

    fn update_viewport(&mut self, pos: Vec2i, size: Vec2i);

    fn clear_buffer(&mut self, p: Pixel, depth: bool);
}
