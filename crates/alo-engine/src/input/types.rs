/// Keyboard key identifier.
///
/// Each variant owns one slot in the engine's key table; see [`Key::index`].
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Tab,
    Shift,
    Control,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    Backspace,
    Escape,
    /// Keypad enter.
    Return,
    /// Main enter key.
    Enter,
    Pause,
    ScrollLock,

    // Keypad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadMultiply,
    NumpadDivide,
    NumpadAdd,
    NumpadSubtract,
    NumpadDecimal,

    Period,
    Equals,
    Comma,
    Minus,

    // Layout-dependent punctuation
    Oem1, Oem2, Oem3, Oem4, Oem5, Oem6, Oem7, Oem8,

    CapsLock,
}

impl Key {
    /// Slot of this key in a [`KEY_SLOTS`]-sized table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Size of the key state tables.
pub const KEY_SLOTS: usize = 256;

/// Mouse button identifier.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

pub const MOUSE_BUTTONS: usize = 5;

/// Per-frame state of one key or button.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HwButton {
    /// Went down this frame.
    pub pressed: bool,
    /// Went up this frame.
    pub released: bool,
    /// Is down.
    pub held: bool,
}
