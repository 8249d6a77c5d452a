use alo_engine::coords::Vec2;
use alo_engine::core::Engine;

use super::Button;
use crate::Theme;

/// A button that flips `checked` on every press.
#[derive(Debug, Clone)]
pub struct CheckBox {
    pub button: Button,
    pub checked: bool,
}

impl CheckBox {
    pub fn new(text: impl Into<String>, checked: bool, pos: Vec2, size: Vec2) -> Self {
        Self { button: Button::new(text, pos, size), checked }
    }

    pub(crate) fn update(&mut self, engine: &Engine, theme: &Theme) {
        if !self.button.state.is_live() {
            return;
        }
        self.button.update(engine, theme);
        if self.button.state.pressed {
            self.checked = !self.checked;
        }
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        if !self.button.state.visible {
            return;
        }
        self.button.draw(engine, theme);
        if self.checked {
            let b = &self.button;
            engine.draw_rect((b.pos + Vec2::splat(2.0)).to_i(), (b.size - Vec2::splat(5.0)).to_i(), theme.border);
        }
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        if !self.button.state.visible {
            return;
        }
        self.button.draw_decal(engine, theme);
        if self.checked {
            let b = &self.button;
            engine.draw_rect_decal(b.pos + Vec2::splat(2.0), b.size - Vec2::splat(4.0), theme.border);
            b.draw_text(engine, theme, true);
        }
    }
}
