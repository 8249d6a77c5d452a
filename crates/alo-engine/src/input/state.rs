use std::sync::Mutex;

use super::types::{HwButton, KEY_SLOTS, MOUSE_BUTTONS};
use crate::coords::Vec2i;

/// Diffs `new` against `old` into per-frame button transitions, then latches `new` into `old`.
pub fn scan_buttons(buttons: &mut [HwButton], old: &mut [bool], new: &[bool]) {
    for ((b, o), &n) in buttons.iter_mut().zip(old.iter_mut()).zip(new) {
        b.pressed = false;
        b.released = false;
        if n != *o {
            if n {
                b.pressed = !b.held;
                b.held = true;
            } else {
                b.released = true;
                b.held = false;
            }
        }
        *o = n;
    }
}

/// Input as last reported by the platform thread.
#[derive(Debug, Clone)]
pub struct RawInput {
    pub keys: [bool; KEY_SLOTS],
    pub mouse: [bool; MOUSE_BUTTONS],
    /// Cursor position in window pixels.
    pub mouse_window_pos: Vec2i,
    /// Wheel movement since the last latch.
    pub wheel: i32,
    /// Set when the window size changed since the last latch.
    pub window_size: Option<Vec2i>,
    pub mouse_focus: bool,
    pub key_focus: bool,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            keys: [false; KEY_SLOTS],
            mouse: [false; MOUSE_BUTTONS],
            mouse_window_pos: Vec2i::zero(),
            wheel: 0,
            window_size: None,
            mouse_focus: false,
            key_focus: false,
        }
    }
}

/// Lock-protected hand-off of raw input from the platform thread to the engine thread.
#[derive(Debug, Default)]
pub struct InputHandoff {
    raw: Mutex<RawInput>,
}

impl InputHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutates the shared state. Writes are dropped if the lock is poisoned.
    pub fn write(&self, f: impl FnOnce(&mut RawInput)) {
        match self.raw.lock() {
            Ok(mut raw) => f(&mut raw),
            Err(_) => log::warn!("input state lock poisoned; event dropped"),
        }
    }

    /// Copies the current state for one frame, consuming the accumulated wheel delta and any
    /// pending resize.
    pub fn latch(&self) -> RawInput {
        match self.raw.lock() {
            Ok(mut raw) => {
                let snapshot = raw.clone();
                raw.wheel = 0;
                raw.window_size = None;
                snapshot
            }
            Err(_) => RawInput::default(),
        }
    }
}
