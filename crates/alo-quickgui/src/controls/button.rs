use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::input::MouseButton;

use super::contains;
use crate::painter::{self, Alignment};
use crate::{ControlState, Status, Theme};

/// A clickable, labelled rectangle.
///
/// Fades towards the hover colour while the mouse is over it. A press enters Click, which
/// lasts until the left button is released wherever the mouse is.
#[derive(Debug, Clone)]
pub struct Button {
    pub state: ControlState,
    pub pos: Vec2,
    pub size: Vec2,
    pub text: String,
}

impl Button {
    pub fn new(text: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self { state: ControlState::default(), pos, size, text: text.into() }
    }

    pub(crate) fn update(&mut self, engine: &Engine, theme: &Theme) {
        let state = &mut self.state;
        if !state.is_live() {
            return;
        }
        state.pressed = false;
        state.released = false;

        let dt = engine.elapsed_time();
        let left = engine.get_mouse(MouseButton::Left);

        if state.status == Status::Click {
            state.held = left.held;
            state.released = left.released;
            if left.released {
                state.status = Status::Normal;
            }
        } else if contains(self.pos, self.size, engine.mouse_pos().to_f32()) {
            state.fade(dt * theme.hover_speed_on);
            state.status = Status::Hover;
            state.pressed = left.pressed;
            if left.pressed {
                state.status = Status::Click;
            }
            state.held = left.held;
        } else {
            state.fade(-dt * theme.hover_speed_off);
            state.status = Status::Normal;
        }
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        engine.fill_rect(self.pos.to_i(), self.size.to_i(), self.state.fill(theme));
        painter::panel(engine, self.pos, self.size, None, Some(theme.border));
        self.draw_text(engine, theme, false);
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        painter::panel_decal(engine, self.pos, self.size, Some(self.state.fill(theme)), Some(theme.border));
        self.draw_text(engine, theme, true);
    }

    pub(crate) fn draw_text(&self, engine: &mut Engine, theme: &Theme, decal: bool) {
        let at = painter::text_origin(engine, self.pos, self.size, &self.text, Alignment::Centre);
        if decal {
            painter::text_decal(engine, at, &self.text, theme.text);
        } else {
            painter::text(engine, at, &self.text, theme.text);
        }
    }
}
