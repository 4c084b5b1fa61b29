//! Names for keyboard keys and mouse buttons
//!
//! macroquad's `KeyCode` has no serde support, so bindings are stored by
//! name. The table doubles as the list of keys scanned when capturing a
//! rebind.

use macroquad::prelude::{KeyCode, MouseButton};

macro_rules! key_table {
    ($($key:ident),* $(,)?) => {
        /// Every bindable key with its binding name
        pub const KEYS: &[(KeyCode, &str)] = &[$((KeyCode::$key, stringify!($key))),*];
    };
}

key_table![
    Space, Apostrophe, Comma, Minus, Period, Slash,
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
    Semicolon, Equal,
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    LeftBracket, Backslash, RightBracket, GraveAccent,
    Escape, Enter, Tab, Backspace, Insert, Delete,
    Right, Left, Down, Up, PageUp, PageDown, Home, End,
    CapsLock, ScrollLock, NumLock, PrintScreen, Pause,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Kp0, Kp1, Kp2, Kp3, Kp4, Kp5, Kp6, Kp7, Kp8, Kp9,
    KpDecimal, KpDivide, KpMultiply, KpSubtract, KpAdd, KpEnter, KpEqual,
    LeftShift, LeftControl, LeftAlt, LeftSuper,
    RightShift, RightControl, RightAlt, RightSuper,
    Menu,
];

/// Mouse buttons that can be bound
pub const MOUSE_BUTTONS: &[(MouseButton, &str)] = &[
    (MouseButton::Left, "Left"),
    (MouseButton::Right, "Right"),
    (MouseButton::Middle, "Middle"),
];

pub fn key_name(key: KeyCode) -> Option<&'static str> {
    KEYS.iter().find(|(k, _)| *k == key).map(|(_, n)| *n)
}

/// Case-insensitive key lookup; digits may be written bare (`1` = `Key1`)
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let found = KEYS.iter().find(|(_, n)| n.eq_ignore_ascii_case(name)).map(|(k, _)| *k);
    found.or_else(|| match name.as_bytes() {
        [d @ b'0'..=b'9'] => key_from_name(&format!("Key{}", *d as char)),
        _ => None,
    })
}

pub fn mouse_name(button: MouseButton) -> Option<&'static str> {
    MOUSE_BUTTONS.iter().find(|(b, _)| *b == button).map(|(_, n)| *n)
}

pub fn mouse_from_name(name: &str) -> Option<MouseButton> {
    MOUSE_BUTTONS.iter().find(|(_, n)| n.eq_ignore_ascii_case(name)).map(|(b, _)| *b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Space), Some("Space"));
        assert_eq!(key_from_name("space"), Some(KeyCode::Space));
        assert_eq!(key_from_name("LEFTSHIFT"), Some(KeyCode::LeftShift));
        assert_eq!(key_from_name("7"), Some(KeyCode::Key7));
        assert_eq!(key_from_name("Hyper"), None);
    }

    #[test]
    fn test_every_key_round_trips() {
        for (key, name) in KEYS {
            assert_eq!(key_from_name(name), Some(*key), "{}", name);
        }
    }

    #[test]
    fn test_mouse_names() {
        assert_eq!(mouse_from_name("middle"), Some(MouseButton::Middle));
        assert_eq!(mouse_name(MouseButton::Right), Some("Right"));
    }
}
