//! Raw input devices
//!
//! `InputSource` is the polling seam between the action layer and the
//! platform. `MacroquadInput` reads keyboard/mouse from macroquad and
//! gamepads from the native backend.

use macroquad::prelude::*;
use super::gamepad::Gamepads;
use super::pad::{ControllerType, PadAxis, PadButton};

/// Current-state queries for every kind of bindable input
pub trait InputSource {
    /// Refresh device state; called once per frame before queries
    fn poll(&mut self) {}

    fn key_down(&self, key: KeyCode) -> bool;

    fn mouse_down(&self, button: MouseButton) -> bool;

    fn pad_down(&self, button: PadButton) -> bool;

    /// Raw axis value (sticks -1..1 with +Y up, triggers 0..1)
    fn pad_axis(&self, axis: PadAxis) -> f32;

    fn has_gamepad(&self) -> bool;

    fn controller_type(&self) -> ControllerType {
        ControllerType::default()
    }
}

/// Keyboard and mouse from macroquad, gamepads from gilrs
pub struct MacroquadInput {
    gamepads: Gamepads,
}

impl MacroquadInput {
    pub fn new() -> Self {
        Self { gamepads: Gamepads::new() }
    }
}

impl Default for MacroquadInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for MacroquadInput {
    fn poll(&mut self) {
        self.gamepads.poll();
    }

    fn key_down(&self, key: KeyCode) -> bool {
        is_key_down(key)
    }

    fn mouse_down(&self, button: MouseButton) -> bool {
        is_mouse_button_down(button)
    }

    fn pad_down(&self, button: PadButton) -> bool {
        self.gamepads.is_down(button)
    }

    fn pad_axis(&self, axis: PadAxis) -> f32 {
        self.gamepads.axis(axis)
    }

    fn has_gamepad(&self) -> bool {
        self.gamepads.has_gamepad()
    }

    fn controller_type(&self) -> ControllerType {
        self.gamepads.controller_type()
    }
}
