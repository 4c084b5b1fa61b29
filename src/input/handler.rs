//! Named actions mapped to bindings
//!
//! Game code asks "is `jump` pressed?" instead of polling keys. Each action
//! holds any number of bindings across keyboard, mouse and gamepad; the
//! handler folds them into one down/pressed/released/value state per frame.

use macroquad::prelude::Vec2;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use crate::serialize::{self, SerializeError};
use super::binding::Binding;
use super::keys::{KEYS, MOUSE_BUTTONS};
use super::pad::{PadAxis, PadButton};
use super::source::InputSource;

/// Standard action names used by `InputHandler::with_defaults`
pub mod action {
    pub const MOVE_LEFT: &str = "move_left";
    pub const MOVE_RIGHT: &str = "move_right";
    pub const MOVE_UP: &str = "move_up";
    pub const MOVE_DOWN: &str = "move_down";
    pub const CONFIRM: &str = "confirm";
    pub const CANCEL: &str = "cancel";
    pub const MENU: &str = "menu";
    pub const NEXT_TAB: &str = "next_tab";
    pub const PREV_TAB: &str = "prev_tab";
}

/// Per-frame state of one action
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
    /// Analog strength 0..1 (digital inputs are 0 or 1)
    pub value: f32,
}

/// Action map plus the state computed from it each frame
#[derive(Debug, Clone)]
pub struct InputHandler {
    actions: BTreeMap<String, Vec<Binding>>,
    states: HashMap<String, ActionState>,
    /// Axis strength above which an axis binding counts as "down"
    pub axis_threshold: f32,
    /// Radial stick deadzone (0.0-1.0)
    pub stick_deadzone: f32,
    raw_down: HashSet<Binding>,
    raw_pressed: Vec<Binding>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
            states: HashMap::new(),
            axis_threshold: 0.5,
            stick_deadzone: 0.15,
            raw_down: HashSet::new(),
            raw_pressed: Vec::new(),
        }
    }

    /// Handler with movement, confirm/cancel and menu actions bound for
    /// keyboard and gamepad
    pub fn with_defaults() -> Self {
        use macroquad::prelude::KeyCode;
        use Binding::*;

        let mut handler = Self::new();
        let table: [(&str, Vec<Binding>); 9] = [
            (action::MOVE_LEFT, vec![Key(KeyCode::A), Key(KeyCode::Left), Pad(PadButton::DPadLeft), Axis { axis: PadAxis::LeftX, positive: false }]),
            (action::MOVE_RIGHT, vec![Key(KeyCode::D), Key(KeyCode::Right), Pad(PadButton::DPadRight), Axis { axis: PadAxis::LeftX, positive: true }]),
            (action::MOVE_UP, vec![Key(KeyCode::W), Key(KeyCode::Up), Pad(PadButton::DPadUp), Axis { axis: PadAxis::LeftY, positive: true }]),
            (action::MOVE_DOWN, vec![Key(KeyCode::S), Key(KeyCode::Down), Pad(PadButton::DPadDown), Axis { axis: PadAxis::LeftY, positive: false }]),
            (action::CONFIRM, vec![Key(KeyCode::Enter), Key(KeyCode::Space), Pad(PadButton::South)]),
            (action::CANCEL, vec![Key(KeyCode::Escape), Key(KeyCode::Backspace), Pad(PadButton::East)]),
            (action::MENU, vec![Key(KeyCode::Tab), Pad(PadButton::Start)]),
            (action::NEXT_TAB, vec![Key(KeyCode::E), Pad(PadButton::RightBumper)]),
            (action::PREV_TAB, vec![Key(KeyCode::Q), Pad(PadButton::LeftBumper)]),
        ];
        for (name, bindings) in table {
            handler.rebind(name, bindings);
        }
        handler
    }

    /// Add a binding to an action (creating the action); duplicates are ignored
    pub fn bind(&mut self, action: &str, binding: Binding) {
        let bindings = self.actions.entry(action.to_string()).or_default();
        if !bindings.contains(&binding) {
            bindings.push(binding);
        }
    }

    /// Remove one binding; returns false if it wasn't bound
    pub fn unbind(&mut self, action: &str, binding: Binding) -> bool {
        let Some(bindings) = self.actions.get_mut(action) else { return false };
        let before = bindings.len();
        bindings.retain(|b| *b != binding);
        bindings.len() != before
    }

    /// Replace all bindings of an action
    pub fn rebind(&mut self, action: &str, bindings: impl IntoIterator<Item = Binding>) {
        let entry = self.actions.entry(action.to_string()).or_default();
        entry.clear();
        for binding in bindings {
            if !entry.contains(&binding) {
                entry.push(binding);
            }
        }
    }

    /// Remove an action entirely
    pub fn clear_action(&mut self, action: &str) {
        self.actions.remove(action);
        self.states.remove(action);
    }

    pub fn bindings(&self, action: &str) -> &[Binding] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Action names in sorted order
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Recompute every action from the source; call once per frame
    pub fn update(&mut self, source: &dyn InputSource) {
        for (name, bindings) in &self.actions {
            let value = bindings
                .iter()
                .map(|b| self.binding_value(*b, source))
                .fold(0.0f32, f32::max);
            let down = bindings.iter().any(|b| self.binding_down(*b, source));

            let state = self.states.entry(name.clone()).or_default();
            let was_down = state.down;
            *state = ActionState {
                down,
                pressed: down && !was_down,
                released: !down && was_down,
                value,
            };
        }
        self.states.retain(|name, _| self.actions.contains_key(name));
        self.scan_raw(source);
    }

    fn binding_value(&self, binding: Binding, source: &dyn InputSource) -> f32 {
        match binding {
            Binding::Axis { axis, positive } => {
                let raw = source.pad_axis(axis);
                let directed = if positive { raw } else { -raw };
                rescale_deadzone(directed.clamp(0.0, 1.0), self.stick_deadzone)
            }
            other => {
                if self.binding_down(other, source) { 1.0 } else { 0.0 }
            }
        }
    }

    fn binding_down(&self, binding: Binding, source: &dyn InputSource) -> bool {
        match binding {
            Binding::Key(key) => source.key_down(key),
            Binding::Mouse(button) => source.mouse_down(button),
            Binding::Pad(button) => source.pad_down(button),
            Binding::Axis { axis, positive } => {
                let raw = source.pad_axis(axis);
                let directed = if positive { raw } else { -raw };
                directed > self.axis_threshold
            }
        }
    }

    /// Track every raw input so a rebind menu can grab the next press
    fn scan_raw(&mut self, source: &dyn InputSource) {
        let mut now = HashSet::new();
        now.extend(KEYS.iter().filter(|(k, _)| source.key_down(*k)).map(|(k, _)| Binding::Key(*k)));
        now.extend(MOUSE_BUTTONS.iter().filter(|(b, _)| source.mouse_down(*b)).map(|(b, _)| Binding::Mouse(*b)));
        if source.has_gamepad() {
            now.extend(PadButton::ALL.into_iter().filter(|b| source.pad_down(*b)).map(Binding::Pad));
        }

        // Keep scan order (keys, mouse, pad) so capture is deterministic
        self.raw_pressed.clear();
        for (key, _) in KEYS {
            let b = Binding::Key(*key);
            if now.contains(&b) && !self.raw_down.contains(&b) {
                self.raw_pressed.push(b);
            }
        }
        for (button, _) in MOUSE_BUTTONS {
            let b = Binding::Mouse(*button);
            if now.contains(&b) && !self.raw_down.contains(&b) {
                self.raw_pressed.push(b);
            }
        }
        for button in PadButton::ALL {
            let b = Binding::Pad(button);
            if now.contains(&b) && !self.raw_down.contains(&b) {
                self.raw_pressed.push(b);
            }
        }
        self.raw_down = now;
    }

    /// First raw input newly pressed during the last `update`
    ///
    /// Used by rebinding menus: "press a key for Jump".
    pub fn capture_binding(&self) -> Option<Binding> {
        self.raw_pressed.first().copied()
    }

    pub fn state(&self, action: &str) -> ActionState {
        self.states.get(action).copied().unwrap_or_default()
    }

    /// Action is held this frame
    pub fn down(&self, action: &str) -> bool {
        self.state(action).down
    }

    /// Action went down this frame
    pub fn pressed(&self, action: &str) -> bool {
        self.state(action).pressed
    }

    /// Action went up this frame
    pub fn released(&self, action: &str) -> bool {
        self.state(action).released
    }

    /// Analog strength 0..1
    pub fn value(&self, action: &str) -> f32 {
        self.state(action).value
    }

    /// Signed axis from two opposing actions, -1..1
    pub fn axis(&self, negative: &str, positive: &str) -> f32 {
        (self.value(positive) - self.value(negative)).clamp(-1.0, 1.0)
    }

    /// 2D direction from four actions in screen orientation (+Y down),
    /// normalized when diagonal input exceeds length 1
    pub fn vector(&self, left: &str, right: &str, up: &str, down: &str) -> Vec2 {
        let v = Vec2::new(self.axis(left, right), self.axis(up, down));
        if v.length() > 1.0 {
            v.normalize()
        } else {
            v
        }
    }

    /// Read a stick pair directly with radial deadzone (+Y up)
    pub fn stick(&self, x: PadAxis, y: PadAxis, source: &dyn InputSource) -> Vec2 {
        apply_deadzone(source.pad_axis(x), source.pad_axis(y), self.stick_deadzone)
    }

    /// Save the action map (`.ron` or `.json`)
    pub fn save_bindings(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        serialize::save(path, &self.actions)
    }

    /// Replace the action map from a file
    pub fn load_bindings(&mut self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        let actions: BTreeMap<String, Vec<Binding>> = serialize::load(path.as_ref())?;
        log::info!("loaded {} actions from {}", actions.len(), path.as_ref().display());
        self.actions = actions;
        self.states.retain(|name, _| self.actions.contains_key(name));
        Ok(())
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map deadzone..1 onto 0..1
fn rescale_deadzone(value: f32, deadzone: f32) -> f32 {
    if value < deadzone {
        0.0
    } else {
        ((value - deadzone) / (1.0 - deadzone)).min(1.0)
    }
}

/// Apply radial deadzone with linear rescaling
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone || len == 0.0 {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = ((len - deadzone) / (1.0 - deadzone)).min(1.0) / len;
    Vec2::new(x * scale, y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{KeyCode, MouseButton};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Scripted {
        keys: HashSet<KeyCode>,
        mouse: HashSet<MouseButton>,
        pad: HashSet<PadButton>,
        axes: HashMap<PadAxis, f32>,
    }

    impl InputSource for Scripted {
        fn key_down(&self, key: KeyCode) -> bool {
            self.keys.contains(&key)
        }
        fn mouse_down(&self, button: MouseButton) -> bool {
            self.mouse.contains(&button)
        }
        fn pad_down(&self, button: PadButton) -> bool {
            self.pad.contains(&button)
        }
        fn pad_axis(&self, axis: PadAxis) -> f32 {
            self.axes.get(&axis).copied().unwrap_or(0.0)
        }
        fn has_gamepad(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_pressed_then_down_then_released() {
        let mut input = InputHandler::with_defaults();
        let mut src = Scripted::default();

        src.keys.insert(KeyCode::Space);
        input.update(&src);
        assert!(input.pressed(action::CONFIRM));
        assert!(input.down(action::CONFIRM));

        input.update(&src);
        assert!(!input.pressed(action::CONFIRM));
        assert!(input.down(action::CONFIRM));

        src.keys.clear();
        input.update(&src);
        assert!(input.released(action::CONFIRM));
        assert!(!input.down(action::CONFIRM));
    }

    #[test]
    fn test_any_binding_triggers() {
        let mut input = InputHandler::with_defaults();
        let mut src = Scripted::default();
        src.pad.insert(PadButton::South);
        input.update(&src);
        assert!(input.down(action::CONFIRM));
        assert_eq!(input.value(action::CONFIRM), 1.0);
    }

    #[test]
    fn test_unknown_action_is_idle() {
        let input = InputHandler::new();
        assert!(!input.down("fly"));
        assert_eq!(input.value("fly"), 0.0);
    }

    #[test]
    fn test_axis_binding_threshold_and_value() {
        let mut input = InputHandler::with_defaults();
        let mut src = Scripted::default();

        src.axes.insert(PadAxis::LeftX, -0.4);
        input.update(&src);
        assert!(!input.down(action::MOVE_LEFT));
        assert!(input.value(action::MOVE_LEFT) > 0.0);
        assert_eq!(input.value(action::MOVE_RIGHT), 0.0);

        src.axes.insert(PadAxis::LeftX, -1.0);
        input.update(&src);
        assert!(input.pressed(action::MOVE_LEFT));
        assert!((input.value(action::MOVE_LEFT) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_vector_is_normalized() {
        let mut input = InputHandler::with_defaults();
        let mut src = Scripted::default();
        src.keys.insert(KeyCode::D);
        src.keys.insert(KeyCode::S);
        input.update(&src);
        let v = input.vector(action::MOVE_LEFT, action::MOVE_RIGHT, action::MOVE_UP, action::MOVE_DOWN);
        assert!((v.length() - 1.0).abs() < 0.001);
        assert!(v.x > 0.0 && v.y > 0.0, "right + down is +x +y on screen");
    }

    #[test]
    fn test_bind_unbind_rebind() {
        let mut input = InputHandler::new();
        input.bind("jump", Binding::Key(KeyCode::Space));
        input.bind("jump", Binding::Key(KeyCode::Space));
        assert_eq!(input.bindings("jump").len(), 1);

        assert!(input.unbind("jump", Binding::Key(KeyCode::Space)));
        assert!(!input.unbind("jump", Binding::Key(KeyCode::Space)));

        input.rebind("jump", [Binding::Pad(PadButton::South), Binding::Key(KeyCode::J)]);
        assert_eq!(input.bindings("jump"), &[Binding::Pad(PadButton::South), Binding::Key(KeyCode::J)]);

        input.clear_action("jump");
        assert_eq!(input.actions().count(), 0);
    }

    #[test]
    fn test_capture_binding_only_new_presses() {
        let mut input = InputHandler::new();
        let mut src = Scripted::default();
        src.keys.insert(KeyCode::F);
        input.update(&src);
        assert_eq!(input.capture_binding(), Some(Binding::Key(KeyCode::F)));

        // Held key is not captured again, a new pad press is
        src.pad.insert(PadButton::North);
        input.update(&src);
        assert_eq!(input.capture_binding(), Some(Binding::Pad(PadButton::North)));

        input.update(&src);
        assert_eq!(input.capture_binding(), None);
    }

    #[test]
    fn test_stick_deadzone() {
        let input = InputHandler::new();
        let mut src = Scripted::default();
        src.axes.insert(PadAxis::RightX, 0.1);
        assert_eq!(input.stick(PadAxis::RightX, PadAxis::RightY, &src), Vec2::ZERO);

        src.axes.insert(PadAxis::RightX, 1.0);
        let v = input.stick(PadAxis::RightX, PadAxis::RightY, &src);
        assert!((v.x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_bindings_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bindings.ron");
        let input = InputHandler::with_defaults();
        input.save_bindings(&path).unwrap();

        let mut loaded = InputHandler::new();
        loaded.load_bindings(&path).unwrap();
        assert_eq!(loaded.bindings(action::CONFIRM), input.bindings(action::CONFIRM));
        assert_eq!(loaded.actions().count(), input.actions().count());
    }
}
