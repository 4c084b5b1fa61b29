//! Hex color strings (`#RGB`, `#RRGGBB`, `#RRGGBBAA`)

use macroquad::prelude::Color;
use super::PaletteError;

/// Parse a hex color; the leading `#` is optional
pub fn parse_hex(s: &str) -> Result<Color, PaletteError> {
    let digits = s.trim().trim_start_matches('#');
    let bad = || PaletteError::BadColor(s.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }

    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
    let (r, g, b, a) = match digits.len() {
        3 => {
            let nib = |i: usize| {
                u8::from_str_radix(&digits[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| bad())
            };
            (nib(0)?, nib(1)?, nib(2)?, 255)
        }
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return Err(bad()),
    };
    Ok(Color::from_rgba(r, g, b, a))
}

/// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque
pub fn to_hex(color: Color) -> String {
    let [r, g, b, a] = to_bytes(color);
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Color channels as 0-255 bytes, rounded to nearest
pub fn to_bytes(color: Color) -> [u8; 4] {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [byte(color.r), byte(color.g), byte(color.b), byte(color.a)]
}
