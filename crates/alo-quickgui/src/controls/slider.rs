use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::input::MouseButton;

use crate::{ControlState, Status, Theme};

/// A grab handle that slides along the track `pos_min -> pos_max`.
///
/// `value` maps linearly onto the track, `min` at `pos_min`. While dragged, the mouse is
/// projected onto the track line, so the handle can be pulled from anywhere.
///
/// # Example
/// ```rust,ignore
/// let radius = manager.add(Slider::new(
///     Vec2::new(20.0, 20.0), Vec2::new(220.0, 20.0), 0.0, 400.0, 200.0,
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Slider {
    pub state: ControlState,
    pub pos_min: Vec2,
    pub pos_max: Vec2,
    pub min: f32,
    pub max: f32,
    pub value: f32,
}

impl Slider {
    pub fn new(pos_min: Vec2, pos_max: Vec2, min: f32, max: f32, value: f32) -> Self {
        Self { state: ControlState::default(), pos_min, pos_max, min, max, value }
    }

    /// Screen position of the handle centre.
    pub fn handle_pos(&self) -> Vec2 {
        let range = self.max - self.min;
        let t = if range == 0.0 { 0.0 } else { (self.value - self.min) / range };
        self.pos_min + (self.pos_max - self.pos_min) * t
    }

    pub(crate) fn update(&mut self, engine: &Engine, theme: &Theme) {
        if !self.state.is_live() {
            return;
        }
        let dt = engine.elapsed_time();
        let mouse = engine.mouse_pos().to_f32();
        let left = engine.get_mouse(MouseButton::Left);

        self.state.pressed = false;
        self.state.released = false;
        self.state.held = false;

        if self.state.status == Status::Click {
            let track = self.pos_max - self.pos_min;
            let len2 = track.mag2();
            if len2 > 0.0 {
                let u = track.dot(mouse - self.pos_min) / len2;
                self.value = u * (self.max - self.min) + self.min;
            }
            self.state.held = true;
        } else {
            let grab = theme.grab_rad as i32;
            if (mouse - self.handle_pos()).mag2() <= (grab * grab) as f32 {
                self.state.fade(dt * theme.hover_speed_on);
                self.state.status = Status::Hover;
                if left.pressed {
                    self.state.status = Status::Click;
                    self.state.pressed = true;
                }
            } else {
                self.state.status = Status::Normal;
            }
        }

        if left.released {
            self.state.status = Status::Normal;
            self.state.released = true;
        }

        if self.state.status == Status::Normal {
            self.state.fade(-dt * theme.hover_speed_off);
            self.state.held = false;
        }

        self.value = self.value.max(self.min).min(self.max);
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        engine.draw_line(self.pos_min.to_i(), self.pos_max.to_i(), theme.border);
        let centre = self.handle_pos().to_i();
        let radius = theme.grab_rad as i32;
        engine.fill_circle(centre, radius, self.state.fill(theme));
        engine.draw_circle(centre, radius, theme.border);
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        engine.draw_line_decal(self.pos_min, self.pos_max, theme.border);
        let grab = Vec2::splat(theme.grab_rad);
        let corner = self.handle_pos() - grab;
        engine.fill_rect_decal(corner, grab * 2.0, self.state.fill(theme));
        engine.draw_rect_decal(corner, grab * 2.0, theme.border);
    }
}
