use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::paint::Pixel;

use crate::painter::{self, Alignment};
use crate::{ControlState, Theme};

/// Static text in a box, with optional background and border.
///
/// # Example
/// ```rust,ignore
/// let id = manager.add(Label::new("Radius", Vec2::new(10.0, 10.0), Vec2::new(80.0, 16.0))
///     .align(Alignment::Left)
///     .border(true));
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    pub state: ControlState,
    pub pos: Vec2,
    pub size: Vec2,
    pub text: String,
    pub has_border: bool,
    pub has_background: bool,
    pub align: Alignment,
}

impl Label {
    pub fn new(text: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self {
            state: ControlState::default(),
            pos,
            size,
            text: text.into(),
            has_border: false,
            has_background: false,
            align: Alignment::Centre,
        }
    }

    pub fn border(mut self, v: bool) -> Self { self.has_border = v; self }
    pub fn background(mut self, v: bool) -> Self { self.has_background = v; self }
    pub fn align(mut self, v: Alignment) -> Self { self.align = v; self }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        let (bg, border) = self.frame_colours(theme);
        painter::panel(engine, self.pos, self.size, bg, border);
        let at = painter::text_origin(engine, self.pos, self.size, &self.text, self.align);
        painter::text(engine, at, &self.text, theme.text);
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        let (bg, border) = self.frame_colours(theme);
        painter::panel_decal(engine, self.pos, self.size, bg, border);
        let at = painter::text_origin(engine, self.pos, self.size, &self.text, self.align);
        painter::text_decal(engine, at, &self.text, theme.text);
    }

    /// Background and border colours, `None` where the part is switched off.
    pub(crate) fn frame_colours(&self, theme: &Theme) -> (Option<Pixel>, Option<Pixel>) {
        (
            self.has_background.then_some(theme.normal),
            self.has_border.then_some(theme.border),
        )
    }
}
