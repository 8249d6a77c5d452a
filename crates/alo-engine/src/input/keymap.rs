use super::Key;

/// UK keyboard layout: key, plain text, shifted text.
pub(crate) const UK_KEYBOARD: &[(Key, &str, &str)] = &[
    (Key::A, "a", "A"), (Key::B, "b", "B"), (Key::C, "c", "C"), (Key::D, "d", "D"),
    (Key::E, "e", "E"), (Key::F, "f", "F"), (Key::G, "g", "G"), (Key::H, "h", "H"),
    (Key::I, "i", "I"), (Key::J, "j", "J"), (Key::K, "k", "K"), (Key::L, "l", "L"),
    (Key::M, "m", "M"), (Key::N, "n", "N"), (Key::O, "o", "O"), (Key::P, "p", "P"),
    (Key::Q, "q", "Q"), (Key::R, "r", "R"), (Key::S, "s", "S"), (Key::T, "t", "T"),
    (Key::U, "u", "U"), (Key::V, "v", "V"), (Key::W, "w", "W"), (Key::X, "x", "X"),
    (Key::Y, "y", "Y"), (Key::Z, "z", "Z"),

    (Key::Digit0, "0", ")"), (Key::Digit1, "1", "!"), (Key::Digit2, "2", "\""),
    (Key::Digit3, "3", "#"), (Key::Digit4, "4", "$"), (Key::Digit5, "5", "%"),
    (Key::Digit6, "6", "^"), (Key::Digit7, "7", "&"), (Key::Digit8, "8", "*"),
    (Key::Digit9, "9", "("),

    (Key::Numpad0, "0", "0"), (Key::Numpad1, "1", "1"), (Key::Numpad2, "2", "2"),
    (Key::Numpad3, "3", "3"), (Key::Numpad4, "4", "4"), (Key::Numpad5, "5", "5"),
    (Key::Numpad6, "6", "6"), (Key::Numpad7, "7", "7"), (Key::Numpad8, "8", "8"),
    (Key::Numpad9, "9", "9"),
    (Key::NumpadMultiply, "*", "*"), (Key::NumpadDivide, "/", "/"),
    (Key::NumpadAdd, "+", "+"), (Key::NumpadSubtract, "-", "-"),
    (Key::NumpadDecimal, ".", "."),

    (Key::Period, ".", ">"), (Key::Equals, "=", "+"), (Key::Comma, ",", "<"),
    (Key::Minus, "-", "_"), (Key::Space, " ", " "),

    (Key::Oem1, ";", ":"), (Key::Oem2, "/", "?"), (Key::Oem3, "'", "@"),
    (Key::Oem4, "[", "{"), (Key::Oem5, "\\", "|"), (Key::Oem6, "]", "}"),
    (Key::Oem7, "#", "~"),
];
