//! Input bindings: what physical input triggers an action

use macroquad::prelude::{KeyCode, MouseButton};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use super::keys::{key_from_name, key_name, mouse_from_name, mouse_name};
use super::pad::{ControllerType, PadAxis, PadButton};

/// A single physical input
///
/// Written as `key:Space`, `mouse:Left`, `pad:South` or `axis:LeftX+` in
/// binding files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
    Pad(PadButton),
    /// One direction of an analog axis
    Axis { axis: PadAxis, positive: bool },
}

impl Binding {
    /// Human-readable label for prompts ("Space", "Cross", "Left Stick →")
    pub fn label(&self, controller: ControllerType) -> String {
        match self {
            Binding::Key(key) => key_name(*key).unwrap_or("?").to_string(),
            Binding::Mouse(button) => format!("Mouse {}", mouse_name(*button).unwrap_or("?")),
            Binding::Pad(button) => button.label(controller).to_string(),
            Binding::Axis { axis, positive } => {
                let arrow = match (axis, positive) {
                    (PadAxis::LeftX | PadAxis::RightX, true) => "→",
                    (PadAxis::LeftX | PadAxis::RightX, false) => "←",
                    (PadAxis::LeftY | PadAxis::RightY, true) => "↑",
                    (PadAxis::LeftY | PadAxis::RightY, false) => "↓",
                    (PadAxis::LeftTrigger, _) => return PadButton::LeftTrigger.label(controller).to_string(),
                    (PadAxis::RightTrigger, _) => return PadButton::RightTrigger.label(controller).to_string(),
                };
                let stick = match axis {
                    PadAxis::LeftX | PadAxis::LeftY => "Left Stick",
                    _ => "Right Stick",
                };
                format!("{} {}", stick, arrow)
            }
        }
    }

    pub fn is_gamepad(&self) -> bool {
        matches!(self, Binding::Pad(_) | Binding::Axis { .. })
    }
}

/// Failure to parse a binding string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingParseError {
    /// Missing or unknown `kind:` prefix
    BadPrefix(String),
    UnknownKey(String),
    UnknownMouseButton(String),
    UnknownPadButton(String),
    /// Unknown axis or missing `+`/`-` suffix
    BadAxis(String),
}

impl fmt::Display for BindingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingParseError::BadPrefix(s) => {
                write!(f, "invalid binding {:?} (expected key:, mouse:, pad: or axis:)", s)
            }
            BindingParseError::UnknownKey(s) => write!(f, "unknown key: {}", s),
            BindingParseError::UnknownMouseButton(s) => write!(f, "unknown mouse button: {}", s),
            BindingParseError::UnknownPadButton(s) => write!(f, "unknown gamepad button: {}", s),
            BindingParseError::BadAxis(s) => write!(f, "invalid axis binding: {} (e.g. LeftX+)", s),
        }
    }
}

impl std::error::Error for BindingParseError {}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Key(key) => write!(f, "key:{}", key_name(*key).unwrap_or("Unknown")),
            Binding::Mouse(button) => write!(f, "mouse:{}", mouse_name(*button).unwrap_or("Unknown")),
            Binding::Pad(button) => write!(f, "pad:{}", button.name()),
            Binding::Axis { axis, positive } => {
                write!(f, "axis:{}{}", axis.name(), if *positive { '+' } else { '-' })
            }
        }
    }
}

impl FromStr for Binding {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((kind, value)) = s.split_once(':') else {
            return Err(BindingParseError::BadPrefix(s.to_string()));
        };
        let value = value.trim();

        match kind.trim().to_ascii_lowercase().as_str() {
            "key" => key_from_name(value)
                .map(Binding::Key)
                .ok_or_else(|| BindingParseError::UnknownKey(value.to_string())),
            "mouse" => mouse_from_name(value)
                .map(Binding::Mouse)
                .ok_or_else(|| BindingParseError::UnknownMouseButton(value.to_string())),
            "pad" => PadButton::from_name(value)
                .map(Binding::Pad)
                .ok_or_else(|| BindingParseError::UnknownPadButton(value.to_string())),
            "axis" => {
                let bad = || BindingParseError::BadAxis(value.to_string());
                let (name, positive) = if let Some(name) = value.strip_suffix('+') {
                    (name, true)
                } else if let Some(name) = value.strip_suffix('-') {
                    (name, false)
                } else {
                    return Err(bad());
                };
                let axis = PadAxis::from_name(name).ok_or_else(bad)?;
                Ok(Binding::Axis { axis, positive })
            }
            _ => Err(BindingParseError::BadPrefix(s.to_string())),
        }
    }
}

impl TryFrom<String> for Binding {
    type Error = BindingParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Binding> for String {
    fn from(b: Binding) -> Self {
        b.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_kind() {
        assert_eq!("key:Space".parse(), Ok(Binding::Key(KeyCode::Space)));
        assert_eq!("MOUSE:left".parse(), Ok(Binding::Mouse(MouseButton::Left)));
        assert_eq!("pad:south".parse(), Ok(Binding::Pad(PadButton::South)));
        assert_eq!(
            "axis:LeftY-".parse(),
            Ok(Binding::Axis { axis: PadAxis::LeftY, positive: false })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("Space".parse::<Binding>(), Err(BindingParseError::BadPrefix("Space".into())));
        assert_eq!("joy:1".parse::<Binding>(), Err(BindingParseError::BadPrefix("joy:1".into())));
        assert_eq!("key:Hyper".parse::<Binding>(), Err(BindingParseError::UnknownKey("Hyper".into())));
        assert_eq!("axis:LeftX".parse::<Binding>(), Err(BindingParseError::BadAxis("LeftX".into())));
        assert_eq!("axis:Wheel+".parse::<Binding>(), Err(BindingParseError::BadAxis("Wheel+".into())));
    }

    #[test]
    fn test_display_is_parseable() {
        let bindings = [
            Binding::Key(KeyCode::LeftShift),
            Binding::Mouse(MouseButton::Middle),
            Binding::Pad(PadButton::DPadLeft),
            Binding::Axis { axis: PadAxis::RightTrigger, positive: true },
        ];
        for b in bindings {
            assert_eq!(b.to_string().parse(), Ok(b));
        }
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&Binding::Pad(PadButton::North)).unwrap();
        assert_eq!(json, "\"pad:North\"");
        let parsed: Binding = serde_json::from_str("\"key:Enter\"").unwrap();
        assert_eq!(parsed, Binding::Key(KeyCode::Enter));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Binding::Pad(PadButton::South).label(ControllerType::PlayStation), "Cross");
        assert_eq!(
            Binding::Axis { axis: PadAxis::LeftX, positive: false }.label(ControllerType::Xbox),
            "Left Stick ←"
        );
        assert_eq!(Binding::Key(KeyCode::W).label(ControllerType::Xbox), "W");
    }
}
