use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::coords::Vec2i;
use crate::input::{InputHandoff, Key, MouseButton};

/// Entry points a platform uses to report events to a running engine.
///
/// Cheap to clone; every clone feeds the same engine.
#[derive(Debug, Clone)]
pub struct EngineHooks {
    input: Arc<InputHandoff>,
    running: Arc<AtomicBool>,
}

impl EngineHooks {
    pub fn new(input: Arc<InputHandoff>, running: Arc<AtomicBool>) -> Self {
        Self { input, running }
    }

    /// Cursor moved to `(x, y)` in window pixels.
    pub fn update_mouse(&self, x: i32, y: i32) {
        self.input.write(|r| {
            r.mouse_focus = true;
            r.mouse_window_pos = Vec2i::new(x, y);
        });
    }

    pub fn update_mouse_wheel(&self, delta: i32) {
        self.input.write(|r| r.wheel += delta);
    }

    pub fn update_window_size(&self, w: i32, h: i32) {
        self.input.write(|r| r.window_size = Some(Vec2i::new(w, h)));
    }

    pub fn update_mouse_state(&self, button: MouseButton, down: bool) {
        self.input.write(|r| r.mouse[button.index()] = down);
    }

    pub fn update_key_state(&self, key: Key, down: bool) {
        self.input.write(|r| r.keys[key.index()] = down);
    }

    pub fn update_mouse_focus(&self, focus: bool) {
        self.input.write(|r| r.mouse_focus = focus);
    }

    pub fn update_key_focus(&self, focus: bool) {
        self.input.write(|r| r.key_focus = focus);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Asks the engine loop to stop after its current frame.
    pub fn terminate(&self) {
        self.running.store(false, Ordering::Release);
    }
}
