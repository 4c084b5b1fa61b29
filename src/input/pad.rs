//! Gamepad vocabulary: physical buttons, axes and controller families
//!
//! Buttons are named by position (South = bottom face button) so bindings
//! survive swapping an Xbox pad for a PlayStation one; labels are looked up
//! per controller family only when drawing prompts.

/// Controller manufacturer/type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerType {
    /// PlayStation (DualShock, DualSense)
    PlayStation,
    /// Xbox (360, One, Series)
    #[default]
    Xbox,
    /// Nintendo (Switch Pro, Joy-Con)
    Nintendo,
    /// Unknown pad, uses Xbox labels
    Generic,
}

impl ControllerType {
    /// Detect controller type from the name the driver reports
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        let any = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if any(&["playstation", "dualshock", "dualsense", "sony", "ps3", "ps4", "ps5"]) {
            ControllerType::PlayStation
        } else if any(&["nintendo", "switch", "joy-con", "joycon", "pro controller"]) {
            ControllerType::Nintendo
        } else if any(&["xbox", "microsoft", "xinput"]) {
            ControllerType::Xbox
        } else {
            ControllerType::Generic
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ControllerType::PlayStation => "PlayStation",
            ControllerType::Xbox => "Xbox",
            ControllerType::Nintendo => "Nintendo",
            ControllerType::Generic => "Generic",
        }
    }
}

/// Physical gamepad button position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Guide,
}

/// (binding name, Xbox, PlayStation, Nintendo, short Xbox, short PlayStation, short Nintendo)
type LabelRow = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

impl PadButton {
    pub const ALL: [PadButton; 17] = [
        PadButton::South,
        PadButton::East,
        PadButton::West,
        PadButton::North,
        PadButton::LeftBumper,
        PadButton::RightBumper,
        PadButton::LeftTrigger,
        PadButton::RightTrigger,
        PadButton::Select,
        PadButton::Start,
        PadButton::LeftStick,
        PadButton::RightStick,
        PadButton::DPadUp,
        PadButton::DPadDown,
        PadButton::DPadLeft,
        PadButton::DPadRight,
        PadButton::Guide,
    ];

    fn row(&self) -> LabelRow {
        match self {
            PadButton::South => ("South", "A", "Cross", "B", "A", "✕", "B"),
            PadButton::East => ("East", "B", "Circle", "A", "B", "○", "A"),
            PadButton::West => ("West", "X", "Square", "Y", "X", "□", "Y"),
            PadButton::North => ("North", "Y", "Triangle", "X", "Y", "△", "X"),
            PadButton::LeftBumper => ("LeftBumper", "LB", "L1", "L", "LB", "L1", "L"),
            PadButton::RightBumper => ("RightBumper", "RB", "R1", "R", "RB", "R1", "R"),
            PadButton::LeftTrigger => ("LeftTrigger", "LT", "L2", "ZL", "LT", "L2", "ZL"),
            PadButton::RightTrigger => ("RightTrigger", "RT", "R2", "ZR", "RT", "R2", "ZR"),
            PadButton::Select => ("Select", "View", "Share", "−", "View", "Share", "−"),
            PadButton::Start => ("Start", "Menu", "Options", "+", "Menu", "Opt", "+"),
            PadButton::LeftStick => ("LeftStick", "LS", "L3", "LS", "LS", "L3", "LS"),
            PadButton::RightStick => ("RightStick", "RS", "R3", "RS", "RS", "R3", "RS"),
            PadButton::DPadUp => ("DPadUp", "D-Pad Up", "D-Pad Up", "D-Pad Up", "↑", "↑", "↑"),
            PadButton::DPadDown => ("DPadDown", "D-Pad Down", "D-Pad Down", "D-Pad Down", "↓", "↓", "↓"),
            PadButton::DPadLeft => ("DPadLeft", "D-Pad Left", "D-Pad Left", "D-Pad Left", "←", "←", "←"),
            PadButton::DPadRight => ("DPadRight", "D-Pad Right", "D-Pad Right", "D-Pad Right", "→", "→", "→"),
            PadButton::Guide => ("Guide", "Xbox", "PS", "Home", "⊞", "PS", "⌂"),
        }
    }

    /// Name used in binding strings (`pad:South`)
    pub fn name(&self) -> &'static str {
        self.row().0
    }

    /// Case-insensitive inverse of `name`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Button label as printed on the given controller
    pub fn label(&self, controller: ControllerType) -> &'static str {
        let (_, xbox, ps, nintendo, ..) = self.row();
        match controller {
            ControllerType::PlayStation => ps,
            ControllerType::Xbox | ControllerType::Generic => xbox,
            ControllerType::Nintendo => nintendo,
        }
    }

    /// Short label for tight spaces (glyphs for face buttons and d-pad)
    pub fn short_label(&self, controller: ControllerType) -> &'static str {
        let (.., xbox, ps, nintendo) = self.row();
        match controller {
            ControllerType::PlayStation => ps,
            ControllerType::Xbox | ControllerType::Generic => xbox,
            ControllerType::Nintendo => nintendo,
        }
    }
}

/// Analog gamepad axis
///
/// Sticks range -1..1 with +Y up; triggers range 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl PadAxis {
    pub const ALL: [PadAxis; 6] = [
        PadAxis::LeftX,
        PadAxis::LeftY,
        PadAxis::RightX,
        PadAxis::RightY,
        PadAxis::LeftTrigger,
        PadAxis::RightTrigger,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PadAxis::LeftX => "LeftX",
            PadAxis::LeftY => "LeftY",
            PadAxis::RightX => "RightX",
            PadAxis::RightY => "RightY",
            PadAxis::LeftTrigger => "LeftTrigger",
            PadAxis::RightTrigger => "RightTrigger",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_detection() {
        assert_eq!(ControllerType::from_name("DualSense Wireless Controller"), ControllerType::PlayStation);
        assert_eq!(ControllerType::from_name("Xbox Wireless Controller"), ControllerType::Xbox);
        assert_eq!(ControllerType::from_name("Nintendo Switch Pro Controller"), ControllerType::Nintendo);
        assert_eq!(ControllerType::from_name("Generic USB Gamepad"), ControllerType::Generic);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(PadButton::South.label(ControllerType::PlayStation), "Cross");
        assert_eq!(PadButton::South.label(ControllerType::Xbox), "A");
        assert_eq!(PadButton::South.label(ControllerType::Nintendo), "B");
        assert_eq!(PadButton::East.short_label(ControllerType::PlayStation), "○");
        assert_eq!(PadButton::Start.label(ControllerType::Generic), "Menu");
    }

    #[test]
    fn test_names_round_trip() {
        for b in PadButton::ALL {
            assert_eq!(PadButton::from_name(b.name()), Some(b));
        }
        assert_eq!(PadButton::from_name("dpadup"), Some(PadButton::DPadUp));
        assert_eq!(PadAxis::from_name("rightx"), Some(PadAxis::RightX));
        assert_eq!(PadAxis::from_name("wheel"), None);
    }
}
