//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platforms write raw key/button levels into an [`InputHandoff`]; the engine latches them
//! once per frame and diffs them into [`HwButton`] transitions.

mod keymap;
mod state;
mod types;

pub(crate) use keymap::UK_KEYBOARD;
pub use state::{scan_buttons, InputHandoff, RawInput};
pub use types::{HwButton, Key, MouseButton, KEY_SLOTS, MOUSE_BUTTONS};
