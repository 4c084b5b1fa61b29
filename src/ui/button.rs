//! Push button

use macroquad::prelude::*;
use std::any::Any;
use crate::render::{rounded_rect, Rect};
use crate::text::text_size;
use super::widget::{FontRef, UiEvent, Widget, WidgetId};
use super::{UiContext, UiTheme};

pub struct Button {
    id: WidgetId,
    label: String,
    font: FontRef,
    font_size: f32,
    padding: Vec2,
    enabled: bool,
    rect: Rect,
    /// Press started inside this button and hasn't been released yet
    armed: bool,
    hovered: bool,
}

impl Button {
    pub fn new(id: WidgetId, label: impl Into<String>, font: FontRef, font_size: f32) -> Self {
        Self {
            id,
            label: label.into(),
            font,
            font_size,
            padding: vec2(10.0, 6.0),
            enabled: true,
            rect: Rect::default(),
            armed: false,
            hovered: false,
        }
    }

    pub fn padding(mut self, x: f32, y: f32) -> Self {
        self.padding = vec2(x, y);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.armed = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Widget for Button {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, _max_width: f32) -> Vec2 {
        let text = text_size(self.font.as_ref(), &self.label, self.font_size, 0.0);
        let height = text.y.max(self.font.line_height(self.font_size));
        vec2(text.x, height) + self.padding * 2.0
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.hovered = self.enabled && ctx.hovering(&self.rect);
        if self.hovered {
            ctx.set_hot(self.id);
        }
        if !self.enabled {
            return;
        }

        if ctx.mouse.left_pressed && self.hovered {
            self.armed = true;
            ctx.start_drag(self.id);
        }
        if ctx.mouse.left_released {
            if self.armed && self.hovered {
                ctx.emit(UiEvent::Clicked(self.id));
            }
            self.armed = false;
        }
    }

    fn draw(&self, theme: &UiTheme) {
        let bg = if self.armed && self.hovered {
            theme.pressed
        } else if self.hovered {
            theme.hover
        } else {
            theme.panel
        };
        rounded_rect(self.rect, theme.corner_radius, bg);

        let text_color = if self.enabled { theme.text } else { theme.text_dim };
        let size = text_size(self.font.as_ref(), &self.label, self.font_size, 0.0);
        let x = self.rect.center_x() - size.x * 0.5;
        let top = self.rect.center_y() - size.y * 0.5;
        let baseline = top + self.font.ascent(self.font_size);
        self.font.draw_run(&self.label, x, baseline, self.font_size, 0.0, text_color);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BitmapFont;
    use crate::ui::{KeyboardState, MouseState};
    use std::rc::Rc;

    fn button() -> Button {
        let mut b = Button::new(WidgetId(1), "OK", Rc::new(BitmapFont::metrics_only(8.0, 8.0)), 8.0);
        b.layout(Rect::new(10.0, 10.0, 40.0, 20.0));
        b
    }

    fn step(b: &mut Button, ctx: &mut UiContext, mouse: MouseState) -> Vec<UiEvent> {
        ctx.begin_frame(mouse, KeyboardState::default(), 0.016);
        b.update(ctx);
        ctx.take_events()
    }

    fn at(x: f32, y: f32) -> MouseState {
        MouseState { x, y, ..Default::default() }
    }

    #[test]
    fn test_measure_includes_padding() {
        let b = button();
        let size = b.measure(100.0);
        assert!((size.x - 36.0).abs() < 0.001);
        assert!((size.y - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_click_on_release_inside() {
        let mut b = button();
        let mut ctx = UiContext::new();
        let press = MouseState { left_pressed: true, left_down: true, ..at(20.0, 20.0) };
        assert!(step(&mut b, &mut ctx, press).is_empty());
        let release = MouseState { left_released: true, ..at(22.0, 18.0) };
        assert_eq!(step(&mut b, &mut ctx, release), vec![UiEvent::Clicked(WidgetId(1))]);
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut b = button();
        let mut ctx = UiContext::new();
        let press = MouseState { left_pressed: true, left_down: true, ..at(20.0, 20.0) };
        step(&mut b, &mut ctx, press);
        let release = MouseState { left_released: true, ..at(200.0, 20.0) };
        assert!(step(&mut b, &mut ctx, release).is_empty());
    }

    #[test]
    fn test_press_outside_then_release_inside() {
        let mut b = button();
        let mut ctx = UiContext::new();
        let press = MouseState { left_pressed: true, left_down: true, ..at(200.0, 20.0) };
        step(&mut b, &mut ctx, press);
        let release = MouseState { left_released: true, ..at(20.0, 20.0) };
        assert!(step(&mut b, &mut ctx, release).is_empty());
    }

    #[test]
    fn test_disabled_never_clicks() {
        let mut b = button();
        b.set_enabled(false);
        let mut ctx = UiContext::new();
        step(&mut b, &mut ctx, MouseState { left_pressed: true, left_down: true, ..at(20.0, 20.0) });
        assert!(step(&mut b, &mut ctx, MouseState { left_released: true, ..at(20.0, 20.0) }).is_empty());
    }
}
