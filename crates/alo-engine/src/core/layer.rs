use crate::coords::Vec2;
use crate::decal::{DecalInstance, Renderable};
use crate::paint::{Pixel, WHITE};
use crate::render::Renderer;
use crate::sprite::Sprite;

/// Replaces a layer's default compositing. Receives the layer's queued decals, which are
/// discarded afterwards.
pub type LayerHook = Box<dyn FnMut(&mut dyn Renderer, &[DecalInstance]) + Send>;

/// One compositing layer: a screen-sized canvas plus the decals queued on it this frame.
pub struct LayerDesc {
    pub(crate) offset: Vec2,
    pub(crate) scale: Vec2,
    pub(crate) tint: Pixel,
    pub(crate) show: bool,
    /// The canvas changed since its last upload.
    pub(crate) update: bool,
    pub(crate) draw_target: Renderable,
    pub(crate) decals: Vec<DecalInstance>,
    pub(crate) hook: Option<LayerHook>,
}

impl LayerDesc {
    pub(crate) fn new(draw_target: Renderable) -> Self {
        Self {
            offset: Vec2::zero(),
            scale: Vec2::splat(1.0),
            tint: WHITE,
            show: false,
            update: false,
            draw_target,
            decals: Vec::new(),
            hook: None,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn tint(&self) -> Pixel {
        self.tint
    }

    pub fn is_visible(&self) -> bool {
        self.show
    }

    pub fn is_dirty(&self) -> bool {
        self.update
    }

    pub fn has_custom_render(&self) -> bool {
        self.hook.is_some()
    }

    pub fn sprite(&self) -> &Sprite {
        self.draw_target.sprite()
    }

    /// Decals queued since the last composite.
    pub fn decals(&self) -> &[DecalInstance] {
        &self.decals
    }
}

impl std::fmt::Debug for LayerDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerDesc")
            .field("offset", &self.offset)
            .field("scale", &self.scale)
            .field("tint", &self.tint)
            .field("show", &self.show)
            .field("update", &self.update)
            .field("decals", &self.decals.len())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
