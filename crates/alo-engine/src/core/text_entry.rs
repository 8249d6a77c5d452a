use crate::input::{HwButton, Key, UK_KEYBOARD};

/// Line editor fed by per-frame key transitions.
#[derive(Debug, Default, Clone)]
pub struct TextEntry {
    enabled: bool,
    text: Vec<char>,
    cursor: usize,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns entry on with `text` preloaded and the cursor at its end, or turns it off.
    pub fn enable(&mut self, on: bool, text: &str) {
        if on {
            self.text = text.chars().collect();
            self.cursor = self.text.len();
        }
        self.enabled = on;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies this frame's key presses. Returns the finished text when Enter ends entry.
    pub fn update(&mut self, keys: &[HwButton]) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let pressed = |k: Key| keys.get(k.index()).is_some_and(|b| b.pressed);
        let shift = keys.get(Key::Shift.index()).is_some_and(|b| b.held);

        for &(key, plain, shifted) in UK_KEYBOARD {
            if pressed(key) {
                let s = if shift { shifted } else { plain };
                for c in s.chars() {
                    self.text.insert(self.cursor, c);
                    self.cursor += 1;
                }
            }
        }

        if pressed(Key::ArrowLeft) {
            self.cursor = self.cursor.saturating_sub(1);
        }
        if pressed(Key::ArrowRight) {
            self.cursor = (self.cursor + 1).min(self.text.len());
        }
        if pressed(Key::Backspace) && self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.cursor);
        }
        if pressed(Key::Delete) && self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
        if pressed(Key::Enter) || pressed(Key::Return) {
            self.enabled = false;
            return Some(self.text());
        }
        None
    }
}
