use alo_engine::core::Engine;

use crate::controls::{Button, CheckBox, Label, ListBox, Slider, TextBox};
use crate::{Control, ControlId, Theme};

/// Owns a group of controls and the theme they are drawn with.
///
/// Controls are stored in creation order and addressed by the [`ControlId`] returned from
/// [`Manager::add`]. Update and draw calls visit them in that order.
#[derive(Debug, Clone, Default)]
pub struct Manager {
    controls: Vec<Control>,
    theme: Theme,
}

macro_rules! typed_access {
    ($($get:ident, $get_mut:ident => $kind:ident;)*) => {$(
        pub fn $get(&self, id: ControlId) -> Option<&$kind> {
            match self.controls.get(id.0) {
                Some(Control::$kind(c)) => Some(c),
                _ => None,
            }
        }

        pub fn $get_mut(&mut self, id: ControlId) -> Option<&mut $kind> {
            match self.controls.get_mut(id.0) {
                Some(Control::$kind(c)) => Some(c),
                _ => None,
            }
        }
    )*};
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self { controls: Vec::new(), theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    /// Copies every theme attribute from `other`.
    pub fn copy_theme_from(&mut self, other: &Manager) {
        self.theme = other.theme;
    }

    pub fn add(&mut self, control: impl Into<Control>) -> ControlId {
        let id = ControlId(self.controls.len());
        self.controls.push(control.into());
        id
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls.iter().enumerate().map(|(i, c)| (ControlId(i), c))
    }

    typed_access! {
        label, label_mut => Label;
        text_box, text_box_mut => TextBox;
        button, button_mut => Button;
        check_box, check_box_mut => CheckBox;
        slider, slider_mut => Slider;
        list_box, list_box_mut => ListBox;
    }

    /// Runs input handling for every control.
    pub fn update(&mut self, engine: &mut Engine) {
        for c in &mut self.controls {
            c.update(engine, &self.theme);
        }
    }

    /// Draws every control into the current draw target.
    pub fn draw(&self, engine: &mut Engine) {
        for c in &self.controls {
            c.draw(engine, &self.theme);
        }
    }

    /// Queues every control as decals on the current layer.
    pub fn draw_decal(&self, engine: &mut Engine) {
        for c in &self.controls {
            c.draw_decal(engine, &self.theme);
        }
    }
}
