use alo_engine::core::Engine;

use crate::controls::{Button, CheckBox, Label, ListBox, Slider, TextBox};
use crate::{ControlState, Theme};

/// Handle to a control inside the [`Manager`](crate::Manager) that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub(crate) usize);

impl ControlId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One control of any kind.
#[derive(Debug, Clone)]
pub enum Control {
    Label(Label),
    TextBox(TextBox),
    Button(Button),
    CheckBox(CheckBox),
    Slider(Slider),
    ListBox(ListBox),
}

impl Control {
    pub fn state(&self) -> &ControlState {
        match self {
            Control::Label(c) => &c.state,
            Control::TextBox(c) => &c.label.state,
            Control::Button(c) => &c.state,
            Control::CheckBox(c) => &c.button.state,
            Control::Slider(c) => &c.state,
            Control::ListBox(c) => &c.state,
        }
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        match self {
            Control::Label(c) => &mut c.state,
            Control::TextBox(c) => &mut c.label.state,
            Control::Button(c) => &mut c.state,
            Control::CheckBox(c) => &mut c.button.state,
            Control::Slider(c) => &mut c.state,
            Control::ListBox(c) => &mut c.state,
        }
    }

    /// Switches the control between interactive and greyed out.
    pub fn enable(&mut self, enable: bool) {
        self.state_mut().enable(enable);
    }

    pub(crate) fn update(&mut self, engine: &mut Engine, theme: &Theme) {
        match self {
            Control::Label(_) => {}
            Control::TextBox(c) => c.update(engine),
            Control::Button(c) => c.update(engine, theme),
            Control::CheckBox(c) => c.update(engine, theme),
            Control::Slider(c) => c.update(engine, theme),
            Control::ListBox(c) => c.update(engine),
        }
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        match self {
            Control::Label(c) => c.draw(engine, theme),
            Control::TextBox(c) => c.draw(engine, theme),
            Control::Button(c) => c.draw(engine, theme),
            Control::CheckBox(c) => c.draw(engine, theme),
            Control::Slider(c) => c.draw(engine, theme),
            Control::ListBox(c) => c.draw(engine, theme),
        }
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        match self {
            Control::Label(c) => c.draw_decal(engine, theme),
            Control::TextBox(c) => c.draw_decal(engine, theme),
            Control::Button(c) => c.draw_decal(engine, theme),
            Control::CheckBox(c) => c.draw_decal(engine, theme),
            Control::Slider(c) => c.draw_decal(engine, theme),
            Control::ListBox(c) => c.draw_decal(engine, theme),
        }
    }
}

macro_rules! control_kind {
    ($($kind:ident),* $(,)?) => {$(
        impl From<$kind> for Control {
            fn from(c: $kind) -> Self {
                Control::$kind(c)
            }
        }
    )*};
}

control_kind!(Label, TextBox, Button, CheckBox, Slider, ListBox);
