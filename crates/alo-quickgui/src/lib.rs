//! QuickGUI: immediate-feel controls drawn with alo-engine primitives.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use alo_quickgui::prelude::*;
//!
//! let mut gui = Manager::new();
//! let go = gui.add(Button::new("Go", Vec2::new(10.0, 10.0), Vec2::new(60.0, 16.0)));
//!
//! // In `on_user_update`:
//! gui.update(engine);
//! if gui.button(go).is_some_and(|b| b.state.pressed) {
//!     log::info!("go!");
//! }
//! gui.draw_decal(engine);
//! ```
//!
//! Controls read the mouse and elapsed time from the [`Engine`](alo_engine::core::Engine)
//! passed to [`Manager::update`]; they never own engine resources.

mod control;
pub mod controls;
mod manager;
mod painter;
mod state;
mod theme;

pub use control::{Control, ControlId};
pub use manager::Manager;
pub use painter::Alignment;
pub use state::{ControlState, Status};
pub use theme::Theme;

/// Everything needed to build a GUI.
pub mod prelude {
    pub use crate::controls::{Button, CheckBox, Label, ListBox, Slider, TextBox};
    pub use crate::{Alignment, Control, ControlId, ControlState, Manager, Status, Theme};

    pub use alo_engine::coords::Vec2;
}

#[cfg(test)]
mod tests;
