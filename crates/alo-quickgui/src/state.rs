use alo_engine::paint::{pixel_lerp, Pixel};

use crate::Theme;

/// Interaction phase of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Greyed out, ignores input.
    Disabled,
    #[default]
    Normal,
    /// Under the mouse.
    Hover,
    /// Being manipulated.
    Click,
}

/// State every control carries.
///
/// `pressed` and `released` are single-frame edges; `held` is level-triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub visible: bool,
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
    pub(crate) status: Status,
    /// Hover fade in `[0, 1]`.
    pub(crate) transition: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            visible: true,
            pressed: false,
            held: false,
            released: false,
            status: Status::Normal,
            transition: 0.0,
        }
    }
}

impl ControlState {
    /// Switches the control between Normal and Disabled.
    pub fn enable(&mut self, enable: bool) {
        self.status = if enable { Status::Normal } else { Status::Disabled };
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn transition(&self) -> f32 {
        self.transition
    }

    /// True when the control should react to input this frame.
    pub(crate) fn is_live(&self) -> bool {
        self.visible && self.status != Status::Disabled
    }

    pub(crate) fn fade(&mut self, delta: f32) {
        self.transition = (self.transition + delta).clamp(0.0, 1.0);
    }

    /// Fill colour for the current status.
    pub(crate) fn fill(&self, theme: &Theme) -> Pixel {
        match self.status {
            Status::Disabled => theme.disable,
            Status::Normal | Status::Hover => pixel_lerp(theme.normal, theme.hover, self.transition),
            Status::Click => theme.click,
        }
    }
}
