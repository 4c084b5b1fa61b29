//! Input state for UI interaction

use macroquad::prelude::*;
use crate::render::Rect;
use super::widget::{UiEvent, WidgetId};

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub scroll: f32,         // Scroll wheel delta
}

impl MouseState {
    /// Snapshot macroquad's mouse for this frame
    pub fn from_macroquad() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            scroll: mouse_wheel().1.signum(),
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }
}

/// Keyboard events for this frame (only the focused widget reads them)
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys that went down this frame
    pub pressed: Vec<KeyCode>,
    /// Typed characters this frame
    pub chars: Vec<char>,
    pub shift: bool,
    /// Ctrl or Cmd
    pub ctrl: bool,
}

impl KeyboardState {
    pub fn from_macroquad() -> Self {
        let mut chars = Vec::new();
        while let Some(ch) = get_char_pressed() {
            chars.push(ch);
        }
        Self {
            pressed: get_keys_pressed().into_iter().collect(),
            chars,
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            ctrl: is_key_down(KeyCode::LeftControl)
                || is_key_down(KeyCode::RightControl)
                || is_key_down(KeyCode::LeftSuper)
                || is_key_down(KeyCode::RightSuper),
        }
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
    /// Seconds since last frame
    pub dt: f32,
    /// Widget currently being dragged (if any)
    pub dragging: Option<WidgetId>,
    /// Widget under the mouse
    pub hot: Option<WidgetId>,
    /// Widget receiving keyboard input
    pub focused: Option<WidgetId>,
    events: Vec<UiEvent>,
    /// Visible areas of enclosing scroll views, innermost last
    clip: Vec<Rect>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState, keyboard: KeyboardState, dt: f32) {
        self.mouse = mouse;
        self.keyboard = keyboard;
        self.dt = dt;
        self.hot = None;
        self.clip.clear();

        // Clear dragging if mouse released
        if !self.mouse.left_down && !self.mouse.left_pressed {
            self.dragging = None;
        }
    }

    /// Mouse is over `rect` and not clipped away by a scroll view
    pub fn hovering(&self, rect: &Rect) -> bool {
        self.mouse.inside(rect) && self.clip.last().map_or(true, |c| self.mouse.inside(c))
    }

    /// Restrict hit testing to `rect` (intersected with the current clip)
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clip.last() {
            Some(outer) => outer.intersect(&rect).unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        self.clip.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clip.pop();
    }

    pub fn is_dragging(&self, id: WidgetId) -> bool {
        self.dragging == Some(id)
    }

    pub fn start_drag(&mut self, id: WidgetId) {
        self.dragging = Some(id);
    }

    /// Set hot widget (hovering), unless something else is being dragged
    pub fn set_hot(&mut self, id: WidgetId) {
        if self.dragging.is_none() || self.dragging == Some(id) {
            self.hot = Some(id);
        }
    }

    pub fn is_hot(&self, id: WidgetId) -> bool {
        self.hot == Some(id)
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    /// Move keyboard focus; emits `FocusChanged` when it actually changes
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        if self.focused != id {
            self.focused = id;
            self.emit(UiEvent::FocusChanged(id));
        }
    }

    pub fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    /// Drain events emitted so far
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_limits_hover() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { x: 50.0, y: 150.0, ..Default::default() }, KeyboardState::default(), 0.016);
        let button = Rect::new(0.0, 100.0, 100.0, 100.0);
        assert!(ctx.hovering(&button));

        ctx.push_clip(Rect::new(0.0, 0.0, 100.0, 120.0));
        assert!(!ctx.hovering(&button));
        ctx.pop_clip();
        assert!(ctx.hovering(&button));
    }

    #[test]
    fn test_focus_emits_once() {
        let mut ctx = UiContext::new();
        ctx.set_focus(Some(WidgetId(3)));
        ctx.set_focus(Some(WidgetId(3)));
        assert_eq!(ctx.take_events(), vec![UiEvent::FocusChanged(Some(WidgetId(3)))]);
        assert!(ctx.take_events().is_empty());
    }

    #[test]
    fn test_drag_cleared_on_release() {
        let mut ctx = UiContext::new();
        ctx.start_drag(WidgetId(1));
        ctx.begin_frame(MouseState { left_down: true, ..Default::default() }, KeyboardState::default(), 0.0);
        assert!(ctx.is_dragging(WidgetId(1)));
        ctx.begin_frame(MouseState::default(), KeyboardState::default(), 0.0);
        assert!(ctx.dragging.is_none());
    }
}
