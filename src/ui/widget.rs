//! Widget trait and events

use macroquad::prelude::Vec2;
use std::any::Any;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use crate::render::Rect;
use crate::text::TextRenderer;
use super::{UiContext, UiTheme};

/// Shared font handle used by text widgets
pub type FontRef = Rc<dyn TextRenderer>;

/// Widget identifier; pick your own for widgets you need events from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

impl WidgetId {
    /// Fresh id for widgets nobody needs to address (high range, so it
    /// never collides with small hand-picked ids)
    pub fn auto() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0x8000_0000);
        WidgetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Something that happened in the UI this frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Clicked(WidgetId),
    TextChanged(WidgetId),
    /// Enter pressed in a single-line text input
    TextSubmitted(WidgetId),
    Scrolled(WidgetId, f32),
    FocusChanged(Option<WidgetId>),
}

/// A node in the widget tree
///
/// Each frame runs `layout` top-down, then `update`, then `draw`.
pub trait Widget {
    fn id(&self) -> WidgetId;

    /// Preferred size when given `max_width` of horizontal space
    fn measure(&self, max_width: f32) -> Vec2;

    /// Assign the widget's screen rect (and lay out children)
    fn layout(&mut self, rect: Rect);

    fn rect(&self) -> Rect;

    /// Handle input, emit events through `ctx`
    fn update(&mut self, _ctx: &mut UiContext) {}

    fn draw(&self, theme: &UiTheme);

    /// Pick up theme metrics this widget wasn't given explicitly
    fn apply_theme(&mut self, _theme: &UiTheme) {}

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Depth-first search by id
pub fn find(widget: &dyn Widget, id: WidgetId) -> Option<&dyn Widget> {
    if widget.id() == id {
        return Some(widget);
    }
    widget.children().iter().find_map(|c| find(c.as_ref(), id))
}

/// Depth-first search by id, mutable
pub fn find_mut(widget: &mut dyn Widget, id: WidgetId) -> Option<&mut dyn Widget> {
    if widget.id() == id {
        return Some(widget);
    }
    widget.children_mut().iter_mut().find_map(|c| find_mut(c.as_mut(), id))
}

/// Apply `theme` to a widget and all of its descendants
pub fn apply_theme(widget: &mut dyn Widget, theme: &UiTheme) {
    widget.apply_theme(theme);
    for child in widget.children_mut() {
        apply_theme(child.as_mut(), theme);
    }
}
