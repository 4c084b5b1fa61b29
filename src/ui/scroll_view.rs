//! Vertical scroll container

use macroquad::prelude::*;
use std::any::Any;
use crate::render::{fill_rect, with_clip, Rect};
use super::widget::{find, UiEvent, Widget, WidgetId};
use super::{UiContext, UiTheme};

/// Minimum thumb height in pixels
const MIN_THUMB: f32 = 20.0;

/// Shows a window onto a taller child
///
/// The child is laid out at its measured height, shifted up by the scroll
/// offset. Offset stays within `[0, max(0, content_h - view_h)]`.
pub struct ScrollView {
    id: WidgetId,
    child: Box<dyn Widget>,
    rect: Rect,
    offset: f32,
    content_h: f32,
    /// Child width (narrower than `rect` when the scrollbar shows)
    view_w: f32,
    scroll_speed: f32,
    scrollbar_width: f32,
    custom_scrollbar: Option<f32>,
    /// Mouse y relative to the thumb top while dragging
    grab: Option<f32>,
    /// Cap on the measured height (otherwise the view asks for all of its content)
    max_height: Option<f32>,
    /// Jump to the bottom at the next layout
    pending_end: bool,
}

impl ScrollView {
    pub fn new(id: WidgetId, child: impl Widget + 'static) -> Self {
        Self {
            id,
            child: Box::new(child),
            rect: Rect::default(),
            offset: 0.0,
            content_h: 0.0,
            view_w: 0.0,
            scroll_speed: 24.0,
            scrollbar_width: UiTheme::default().scrollbar_width,
            custom_scrollbar: None,
            grab: None,
            max_height: None,
            pending_end: false,
        }
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Pixels per wheel notch
    pub fn scroll_speed(mut self, speed: f32) -> Self {
        self.scroll_speed = speed;
        self
    }

    pub fn scrollbar_width(mut self, width: f32) -> Self {
        self.scrollbar_width = width;
        self.custom_scrollbar = Some(width);
        self
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn content_height(&self) -> f32 {
        self.content_h
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_h - self.rect.h).max(0.0)
    }

    fn has_scrollbar(&self) -> bool {
        self.content_h > self.rect.h
    }

    /// Visible area the child draws into
    pub fn viewport(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.view_w, self.rect.h)
    }

    fn track_rect(&self) -> Rect {
        self.rect.slice_right(self.scrollbar_width)
    }

    fn thumb_rect(&self) -> Rect {
        let track = self.track_rect();
        if self.content_h <= 0.0 {
            return track;
        }
        let thumb_h = (self.rect.h / self.content_h * track.h).max(MIN_THUMB).min(track.h);
        let max = self.max_offset();
        let t = if max > 0.0 { self.offset / max } else { 0.0 };
        Rect::new(track.x, track.y + t * (track.h - thumb_h), track.w, thumb_h)
    }

    fn layout_child(&mut self) {
        let child_rect = Rect::new(self.rect.x, self.rect.y, self.view_w, self.content_h.max(self.rect.h));
        self.child.layout(child_rect.translate(0.0, -self.offset));
    }

    /// Set the offset (clamped); returns true if it moved
    pub fn scroll_to(&mut self, offset: f32) -> bool {
        let offset = offset.clamp(0.0, self.max_offset());
        if (offset - self.offset).abs() < f32::EPSILON {
            return false;
        }
        self.offset = offset;
        self.layout_child();
        true
    }

    /// Scroll the least amount that brings `target` (screen coords, current
    /// layout) fully into view; the top edge wins if it can't all fit
    pub fn ensure_visible(&mut self, target: Rect) -> bool {
        let view = self.viewport();
        let mut offset = self.offset;
        if target.bottom() > view.bottom() {
            offset += target.bottom() - view.bottom();
        }
        if target.y - (offset - self.offset) < view.y {
            offset = self.offset - (view.y - target.y);
        }
        self.scroll_to(offset)
    }

    /// Scroll to the bottom once the next layout knows the content height
    pub fn scroll_to_end(&mut self) {
        self.pending_end = true;
    }

    /// `ensure_visible` for a descendant widget
    pub fn ensure_child_visible(&mut self, id: WidgetId) -> bool {
        let Some(target) = find(self.child.as_ref(), id).map(|w| w.rect()) else {
            return false;
        };
        self.ensure_visible(target)
    }

    /// Move the thumb top to `y`
    fn drag_thumb_to(&mut self, y: f32) {
        let track = self.track_rect();
        let travel = track.h - self.thumb_rect().h;
        if travel > 0.0 {
            self.scroll_to((y - track.y) / travel * self.max_offset());
        }
    }
}

impl Widget for ScrollView {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, max_width: f32) -> Vec2 {
        let size = self.child.measure(max_width);
        match self.max_height {
            Some(max) => vec2(size.x, size.y.min(max)),
            None => size,
        }
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        let full = self.child.measure(rect.w).y;
        if full > rect.h {
            self.view_w = (rect.w - self.scrollbar_width).max(0.0);
            self.content_h = self.child.measure(self.view_w).y;
        } else {
            self.view_w = rect.w;
            self.content_h = full;
        }
        if self.pending_end {
            self.offset = self.max_offset();
            self.pending_end = false;
        }
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.layout_child();
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let before = self.offset;

        // Handle mouse wheel scrolling
        if ctx.hovering(&self.rect) && ctx.mouse.scroll != 0.0 {
            self.scroll_to(self.offset - ctx.mouse.scroll * self.scroll_speed);
        }

        if self.has_scrollbar() {
            let track = self.track_rect();
            if ctx.mouse.left_pressed && ctx.hovering(&track) {
                let thumb = self.thumb_rect();
                if ctx.mouse.inside(&thumb) {
                    self.grab = Some(ctx.mouse.y - thumb.y);
                } else {
                    // Jump so the thumb centers on the mouse
                    self.grab = Some(thumb.h * 0.5);
                    self.drag_thumb_to(ctx.mouse.y - thumb.h * 0.5);
                }
                ctx.start_drag(self.id);
            }
            if ctx.is_dragging(self.id) && ctx.mouse.left_down {
                if let Some(grab) = self.grab {
                    self.drag_thumb_to(ctx.mouse.y - grab);
                }
            }
        }
        if !ctx.is_dragging(self.id) {
            self.grab = None;
        }

        if (self.offset - before).abs() > f32::EPSILON {
            ctx.emit(UiEvent::Scrolled(self.id, self.offset));
        }

        // Child only sees the mouse through the viewport
        ctx.push_clip(self.viewport());
        self.child.update(ctx);
        ctx.pop_clip();
    }

    fn draw(&self, theme: &UiTheme) {
        with_clip(self.viewport(), || self.child.draw(theme));

        // Draw scrollbar if needed
        if self.has_scrollbar() {
            fill_rect(self.track_rect(), theme.background);
            let thumb = if self.grab.is_some() { theme.accent } else { theme.border };
            fill_rect(self.thumb_rect(), thumb);
        }
    }

    fn apply_theme(&mut self, theme: &UiTheme) {
        self.scrollbar_width = self.custom_scrollbar.unwrap_or(theme.scrollbar_width);
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        std::slice::from_ref(&self.child)
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        std::slice::from_mut(&mut self.child)
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
    use crate::ui::{Button, Container, KeyboardState, MouseState, Spacer};
    use std::rc::Rc;

    fn tall() -> ScrollView {
        let mut view = ScrollView::new(WidgetId(9), Spacer::new(50.0, 300.0));
        view.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        view
    }

    fn frame(view: &mut ScrollView, ctx: &mut UiContext, mouse: MouseState) -> Vec<UiEvent> {
        ctx.begin_frame(mouse, KeyboardState::default(), 0.016);
        view.update(ctx);
        ctx.take_events()
    }

    #[test]
    fn test_offset_clamped() {
        let mut view = tall();
        assert!((view.max_offset() - 200.0).abs() < 0.001);
        view.scroll_to(1000.0);
        assert!((view.offset() - 200.0).abs() < 0.001);
        view.scroll_to(-5.0);
        assert!(view.offset().abs() < 0.001);
    }

    #[test]
    fn test_theme_scrollbar_width() {
        let mut view = ScrollView::new(WidgetId(9), Spacer::new(50.0, 300.0));
        view.apply_theme(&UiTheme { scrollbar_width: 12.0, ..UiTheme::default() });
        view.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!((view.viewport().w - 88.0).abs() < 0.001);

        let mut fixed = ScrollView::new(WidgetId(9), Spacer::new(50.0, 300.0)).scrollbar_width(4.0);
        fixed.apply_theme(&UiTheme { scrollbar_width: 12.0, ..UiTheme::default() });
        fixed.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!((fixed.viewport().w - 96.0).abs() < 0.001);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut view = ScrollView::new(WidgetId(1), Spacer::new(50.0, 40.0));
        view.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(view.max_offset().abs() < 0.001);
        assert!(!view.scroll_to(30.0));
        assert!((view.viewport().w - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_wheel_scrolls_and_moves_child() {
        let mut view = tall();
        let mut ctx = UiContext::new();
        let events = frame(&mut view, &mut ctx, MouseState { x: 50.0, y: 50.0, scroll: -1.0, ..Default::default() });
        assert_eq!(events, vec![UiEvent::Scrolled(WidgetId(9), 24.0)]);
        let child = view.children()[0].rect();
        assert!((child.y + 24.0).abs() < 0.001);
        // Scrollbar takes its width from the child
        assert!((child.w - 92.0).abs() < 0.001);
    }

    #[test]
    fn test_wheel_ignored_when_not_hovered() {
        let mut view = tall();
        let mut ctx = UiContext::new();
        let events = frame(&mut view, &mut ctx, MouseState { x: 150.0, y: 50.0, scroll: -1.0, ..Default::default() });
        assert!(events.is_empty());
    }

    #[test]
    fn test_relayout_keeps_offset_in_range() {
        let mut view = tall();
        view.scroll_to(200.0);
        view.layout(Rect::new(0.0, 0.0, 100.0, 250.0));
        assert!((view.offset() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_max_height_and_scroll_to_end() {
        let mut view = ScrollView::new(WidgetId(4), Spacer::new(50.0, 300.0)).max_height(120.0);
        assert!((view.measure(100.0).y - 120.0).abs() < 0.001);
        view.scroll_to_end();
        view.layout(Rect::new(0.0, 0.0, 100.0, 120.0));
        assert!((view.offset() - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_thumb_drag() {
        let mut view = tall();
        let mut ctx = UiContext::new();
        // Thumb: 100/300 of the track, starts at the top
        let press = MouseState { x: 96.0, y: 10.0, left_pressed: true, left_down: true, ..Default::default() };
        frame(&mut view, &mut ctx, press);
        assert!(ctx.is_dragging(WidgetId(9)));

        let travel = 100.0 - 100.0 / 3.0;
        let drag = MouseState { x: 96.0, y: 10.0 + travel * 0.5, left_down: true, ..Default::default() };
        let events = frame(&mut view, &mut ctx, drag);
        assert!((view.offset() - 100.0).abs() < 0.01);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_ensure_visible() {
        let mut view = tall();
        assert!(view.ensure_visible(Rect::new(0.0, 150.0, 10.0, 20.0)));
        assert!((view.offset() - 70.0).abs() < 0.001);
        // Now at screen y 80..100: already visible
        assert!(!view.ensure_visible(Rect::new(0.0, 80.0, 10.0, 20.0)));
        // Above the viewport
        assert!(view.ensure_visible(Rect::new(0.0, -30.0, 10.0, 20.0)));
        assert!((view.offset() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_child_clipped_to_viewport() {
        let font = Rc::new(BitmapFont::metrics_only(8.0, 8.0));
        let content = Container::vertical()
            .spacing(0.0)
            .child(Spacer::new(10.0, 150.0))
            .child(Button::new(WidgetId(5), "Go", font, 8.0));
        let mut view = ScrollView::new(WidgetId(9), content);
        view.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut ctx = UiContext::new();

        // Button starts at y 150, below the 100px viewport
        let press = MouseState { x: 20.0, y: 155.0, left_pressed: true, left_down: true, ..Default::default() };
        frame(&mut view, &mut ctx, press);
        let release = MouseState { x: 20.0, y: 155.0, left_released: true, ..Default::default() };
        assert!(frame(&mut view, &mut ctx, release).is_empty());

        // Scrolled to the bottom (max offset 70) it sits at y 80..100
        view.scroll_to(100.0);
        let press = MouseState { x: 20.0, y: 90.0, left_pressed: true, left_down: true, ..Default::default() };
        frame(&mut view, &mut ctx, press);
        let release = MouseState { x: 20.0, y: 90.0, left_released: true, ..Default::default() };
        assert_eq!(frame(&mut view, &mut ctx, release), vec![UiEvent::Clicked(WidgetId(5))]);
    }
}
