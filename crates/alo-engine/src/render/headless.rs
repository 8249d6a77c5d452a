//! Windowless renderer.
//!
//! Keeps texture contents on the CPU and records every call it receives, so engine behaviour
//! can be observed without a GPU.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{DeviceTarget, Renderer, TextureId};
use crate::coords::{Vec2, Vec2i};
use crate::decal::{DecalInstance, DecalMode};
use crate::paint::Pixel;
use crate::sprite::Sprite;

/// One backend call as received.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateDevice { size: Vec2i, windowed: bool, vsync: bool },
    DestroyDevice,
    DisplayFrame,
    PrepareDrawing,
    SetDecalMode(DecalMode),
    DrawLayerQuad { texture: Option<TextureId>, offset: Vec2, scale: Vec2, tint: Pixel },
    DrawDecal(DecalInstance),
    CreateTexture { id: TextureId, width: u32, height: u32, filtered: bool, clamp: bool },
    UpdateTexture(TextureId),
    ReadTexture(TextureId),
    DeleteTexture(TextureId),
    ApplyTexture(TextureId),
    UpdateViewport { pos: Vec2i, size: Vec2i },
    ClearBuffer { colour: Pixel, depth: bool },
}

/// Shared handle to a renderer's call log.
pub type CallLog = Arc<Mutex<Vec<RenderCall>>>;

#[derive(Default)]
pub struct HeadlessRenderer {
    log: CallLog,
    textures: HashMap<TextureId, Sprite>,
    next_id: TextureId,
    bound: Option<TextureId>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stays readable after the renderer moves into the engine.
    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn record(&self, call: RenderCall) {
        if let Ok(mut log) = self.log.lock() {
            log.push(call);
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn create_device(&mut self, target: DeviceTarget, _full_screen: bool, vsync: bool) -> Result<()> {
        anyhow::ensure!(target.size.x > 0 && target.size.y > 0, "device target has zero size");
        self.record(RenderCall::CreateDevice {
            size: target.size,
            windowed: target.surface.is_some(),
            vsync,
        });
        Ok(())
    }

    fn destroy_device(&mut self) -> Result<()> {
        self.textures.clear();
        self.bound = None;
        self.record(RenderCall::DestroyDevice);
        Ok(())
    }

    fn display_frame(&mut self) {
        self.record(RenderCall::DisplayFrame);
    }

    fn prepare_drawing(&mut self) {
        self.record(RenderCall::PrepareDrawing);
    }

    fn set_decal_mode(&mut self, mode: DecalMode) {
        self.record(RenderCall::SetDecalMode(mode));
    }

    fn draw_layer_quad(&mut self, offset: Vec2, scale: Vec2, tint: Pixel) {
        self.record(RenderCall::DrawLayerQuad {
            texture: self.bound,
            offset,
            scale,
            tint,
        });
    }

    fn draw_decal(&mut self, decal: &DecalInstance) {
        self.record(RenderCall::DrawDecal(decal.clone()));
    }

    fn create_texture(&mut self, width: u32, height: u32, filtered: bool, clamp: bool) -> TextureId {
        self.next_id += 1;
        let id = self.next_id;
        self.textures.insert(id, Sprite::new(width as i32, height as i32));
        self.bound = Some(id);
        self.record(RenderCall::CreateTexture { id, width, height, filtered, clamp });
        id
    }

    fn update_texture(&mut self, id: TextureId, sprite: &Sprite) {
        match self.textures.get_mut(&id) {
            Some(tex) => *tex = sprite.duplicate(),
            None => log::warn!("update of unknown texture {id}"),
        }
        self.record(RenderCall::UpdateTexture(id));
    }

    fn read_texture(&mut self, id: TextureId, sprite: &mut Sprite) {
        if let Some(tex) = self.textures.get(&id) {
            let n = sprite.data().len().min(tex.data().len());
            sprite.data_mut()[..n].copy_from_slice(&tex.data()[..n]);
        }
        self.record(RenderCall::ReadTexture(id));
    }

    fn delete_texture(&mut self, id: TextureId) -> TextureId {
        self.textures.remove(&id);
        if self.bound == Some(id) {
            self.bound = None;
        }
        self.record(RenderCall::DeleteTexture(id));
        id
    }

    fn apply_texture(&mut self, id: TextureId) {
        self.bound = Some(id);
        self.record(RenderCall::ApplyTexture(id));
    }

    fn update_viewport(&mut self, pos: Vec2i, size: Vec2i) {
        self.record(RenderCall::UpdateViewport { pos, size });
    }

    fn clear_buffer(&mut self, colour: Pixel, depth: bool) {
        self.record(RenderCall::ClearBuffer { colour, depth });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::RED;

    fn calls(log: &CallLog) -> Vec<RenderCall> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn textures_round_trip_through_read() {
        let mut r = HeadlessRenderer::new();
        let id = r.create_texture(2, 2, false, true);

        let mut src = Sprite::new(2, 2);
        src.set_pixel(1, 1, RED);
        r.update_texture(id, &src);

        let mut dst = Sprite::new(2, 2);
        r.read_texture(id, &mut dst);
        assert_eq!(dst.get_pixel(1, 1), RED);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut r = HeadlessRenderer::new();
        let id = r.create_texture(1, 1, false, false);
        assert_eq!(r.texture_count(), 1);
        r.delete_texture(id);
        r.delete_texture(id);
        assert_eq!(r.texture_count(), 0);
    }

    #[test]
    fn ids_are_unique_and_logged() {
        let mut r = HeadlessRenderer::new();
        let log = r.log();
        let a = r.create_texture(1, 1, false, false);
        let b = r.create_texture(1, 1, true, true);
        assert_ne!(a, b);
        assert!(matches!(calls(&log)[1], RenderCall::CreateTexture { filtered: true, .. }));
    }
}
