use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::input::MouseButton;

use super::{contains, Label};
use crate::painter::{self, Alignment};
use crate::Theme;

/// Editable single-line text.
///
/// Pressing inside starts the engine's text entry seeded with the current text; releasing
/// the mouse outside commits the edit. While editing, `label.text` mirrors the entry buffer.
#[derive(Debug, Clone)]
pub struct TextBox {
    pub label: Label,
    editing: bool,
}

impl TextBox {
    pub fn new(text: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        let label = Label::new(text, pos, size).align(Alignment::Left).border(true);
        Self { label, editing: false }
    }

    pub fn text(&self) -> &str {
        &self.label.text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn update(&mut self, engine: &mut Engine) {
        let state = &mut self.label.state;
        if !state.is_live() {
            return;
        }
        state.pressed = false;
        state.released = false;

        let left = engine.get_mouse(MouseButton::Left);
        let mouse = engine.mouse_pos().to_f32();
        state.released = left.released;

        if contains(self.label.pos, self.label.size, mouse) {
            if left.released && engine.is_text_entry_enabled() && !self.editing {
                engine.text_entry_enable(false, "");
            }
            state.pressed = left.pressed;
            if left.pressed && !engine.is_text_entry_enabled() && !self.editing {
                engine.text_entry_enable(true, &self.label.text);
                self.editing = true;
            }
            state.held = left.held;
        } else if left.released && self.editing {
            self.label.text = engine.text_entry_get_string();
            engine.text_entry_enable(false, "");
            self.editing = false;
            log::debug!("text box edit committed: {:?}", self.label.text);
        }

        if self.editing && engine.is_text_entry_enabled() {
            self.label.text = engine.text_entry_get_string();
        }
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        let l = &self.label;
        if !l.state.visible {
            return;
        }
        let (bg, border) = l.frame_colours(theme);
        painter::panel(engine, l.pos, l.size, bg, border);
        if let Some((at, size)) = self.cursor(engine) {
            engine.fill_rect(at.to_i(), size.to_i(), theme.text);
        }
        let at = painter::text_origin(engine, l.pos, l.size, &l.text, Alignment::Left);
        painter::text(engine, at, &l.text, theme.text);
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        let l = &self.label;
        if !l.state.visible {
            return;
        }
        let (bg, border) = l.frame_colours(theme);
        painter::panel_decal(engine, l.pos, l.size, bg, border);
        if let Some((at, size)) = self.cursor(engine) {
            engine.fill_rect_decal(at, size, theme.text);
        }
        let at = painter::text_origin(engine, l.pos, l.size, &l.text, Alignment::Left);
        painter::text_decal(engine, at, &l.text, theme.text);
    }

    fn cursor(&self, engine: &Engine) -> Option<(Vec2, Vec2)> {
        (self.editing && engine.is_text_entry_enabled()).then(|| {
            let l = &self.label;
            painter::cursor_rect(engine, l.pos, l.size, &l.text, engine.text_entry_get_cursor())
        })
    }
}
