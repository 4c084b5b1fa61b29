//! Gamepad backend
//!
//! Native: gilrs for cross-platform gamepad input.
//! WASM: Web Gamepad API through the `web/quadkit_gamepad.js` miniquad plugin.

use super::pad::{ControllerType, PadAxis, PadButton};

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button, EventType, Gilrs};

    pub struct Gamepads {
        /// `None` if the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepads {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => {
                    for (_, gp) in gilrs.gamepads() {
                        log::info!("gamepad found: {}", gp.name());
                    }
                    Some(gilrs)
                }
                Err(e) => {
                    log::warn!("gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        /// Drain pending events so button/axis state is current
        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while let Some(event) = gilrs.next_event() {
                match event.event {
                    EventType::Connected => {
                        log::info!("gamepad connected: {}", gilrs.gamepad(event.id).name());
                    }
                    EventType::Disconnected => log::info!("gamepad disconnected"),
                    _ => {}
                }
            }
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        pub fn controller_type(&self) -> ControllerType {
            self.active()
                .map(|gp| ControllerType::from_name(gp.name()))
                .unwrap_or_default()
        }

        pub fn is_down(&self, button: PadButton) -> bool {
            let Some(gp) = self.active() else { return false };
            gp.is_pressed(match button {
                PadButton::South => Button::South,
                PadButton::East => Button::East,
                PadButton::West => Button::West,
                PadButton::North => Button::North,
                PadButton::LeftBumper => Button::LeftTrigger,
                PadButton::RightBumper => Button::RightTrigger,
                PadButton::LeftTrigger => Button::LeftTrigger2,
                PadButton::RightTrigger => Button::RightTrigger2,
                PadButton::Select => Button::Select,
                PadButton::Start => Button::Start,
                PadButton::LeftStick => Button::LeftThumb,
                PadButton::RightStick => Button::RightThumb,
                PadButton::DPadUp => Button::DPadUp,
                PadButton::DPadDown => Button::DPadDown,
                PadButton::DPadLeft => Button::DPadLeft,
                PadButton::DPadRight => Button::DPadRight,
                PadButton::Guide => Button::Mode,
            })
        }

        pub fn axis(&self, axis: PadAxis) -> f32 {
            let Some(gp) = self.active() else { return 0.0 };
            match axis {
                PadAxis::LeftX => gp.value(Axis::LeftStickX),
                PadAxis::LeftY => gp.value(Axis::LeftStickY),
                PadAxis::RightX => gp.value(Axis::RightStickX),
                PadAxis::RightY => gp.value(Axis::RightStickY),
                PadAxis::LeftTrigger => gp.value(Axis::LeftZ).max(0.0),
                PadAxis::RightTrigger => gp.value(Axis::RightZ).max(0.0),
            }
        }
    }
}

// ============================================================================
// WASM Implementation (Web Gamepad API)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    // Provided by web/quadkit_gamepad.js
    extern "C" {
        fn quadkit_gamepad_connected() -> i32;
        fn quadkit_gamepad_button_mask() -> u32;
        fn quadkit_gamepad_axis(index: i32) -> i32;
    }

    pub struct Gamepads;

    impl Gamepads {
        pub fn new() -> Self {
            Self
        }

        /// The browser keeps gamepad state current on its own
        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            unsafe { quadkit_gamepad_connected() != 0 }
        }

        pub fn controller_type(&self) -> ControllerType {
            ControllerType::default()
        }

        pub fn is_down(&self, button: PadButton) -> bool {
            let mask = unsafe { quadkit_gamepad_button_mask() };
            mask & (1 << standard_index(button)) != 0
        }

        pub fn axis(&self, axis: PadAxis) -> f32 {
            let raw = unsafe { quadkit_gamepad_axis(standard_axis(axis)) };
            web_axis_value(axis, raw)
        }
    }
}

/// Button index in the Web Gamepad API standard mapping
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn standard_index(button: PadButton) -> u32 {
    match button {
        PadButton::South => 0,
        PadButton::East => 1,
        PadButton::West => 2,
        PadButton::North => 3,
        PadButton::LeftBumper => 4,
        PadButton::RightBumper => 5,
        PadButton::LeftTrigger => 6,
        PadButton::RightTrigger => 7,
        PadButton::Select => 8,
        PadButton::Start => 9,
        PadButton::LeftStick => 10,
        PadButton::RightStick => 11,
        PadButton::DPadUp => 12,
        PadButton::DPadDown => 13,
        PadButton::DPadLeft => 14,
        PadButton::DPadRight => 15,
        PadButton::Guide => 16,
    }
}

/// Axis slot understood by the JS side: 0-3 stick axes, 4/5 trigger buttons
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn standard_axis(axis: PadAxis) -> i32 {
    match axis {
        PadAxis::LeftX => 0,
        PadAxis::LeftY => 1,
        PadAxis::RightX => 2,
        PadAxis::RightY => 3,
        PadAxis::LeftTrigger => 4,
        PadAxis::RightTrigger => 5,
    }
}

/// Convert a raw value (scaled by 10000) to the gilrs convention:
/// sticks in -1..1 with up positive, triggers in 0..1
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn web_axis_value(axis: PadAxis, raw: i32) -> f32 {
    let v = raw as f32 / 10000.0;
    match axis {
        PadAxis::LeftY | PadAxis::RightY => (-v).clamp(-1.0, 1.0),
        PadAxis::LeftTrigger | PadAxis::RightTrigger => v.clamp(0.0, 1.0),
        _ => v.clamp(-1.0, 1.0),
    }
}

pub use platform::Gamepads;

impl Default for Gamepads {
    fn default() -> Self {
        Self::new()
    }
}
