//! Framed panel with an optional title bar

use macroquad::prelude::*;
use std::any::Any;
use crate::render::{fill_rect, stroke_rect, Rect};
use super::widget::{FontRef, Widget, WidgetId};
use super::{UiContext, UiTheme};

/// Background, border, optional title and a single child
///
/// Padding and the title size follow the theme unless set on the panel.
pub struct Panel {
    id: WidgetId,
    title: Option<(String, FontRef)>,
    title_size: f32,
    custom_title_size: Option<f32>,
    child: Box<dyn Widget>,
    padding: f32,
    custom_padding: Option<f32>,
    rect: Rect,
}

impl Panel {
    pub fn new(child: impl Widget + 'static) -> Self {
        Self {
            id: WidgetId::auto(),
            title: None,
            title_size: UiTheme::default().header_size,
            custom_title_size: None,
            child: Box::new(child),
            padding: UiTheme::default().padding,
            custom_padding: None,
            rect: Rect::default(),
        }
    }

    pub fn with_id(mut self, id: WidgetId) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>, font: FontRef) -> Self {
        self.title = Some((title.into(), font));
        self
    }

    pub fn title_size(mut self, size: f32) -> Self {
        self.title_size = size;
        self.custom_title_size = Some(size);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self.custom_padding = Some(padding);
        self
    }

    fn title_height(&self) -> f32 {
        self.title.as_ref().map_or(0.0, |(_, font)| font.line_height(self.title_size) + 8.0)
    }

    /// Area the child is laid out in
    pub fn content_rect(&self) -> Rect {
        self.rect.remaining_after_top(self.title_height()).pad(self.padding)
    }
}

impl Widget for Panel {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, max_width: f32) -> Vec2 {
        let inner = self.child.measure((max_width - self.padding * 2.0).max(0.0));
        vec2(inner.x + self.padding * 2.0, inner.y + self.padding * 2.0 + self.title_height())
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        let content = self.content_rect();
        self.child.layout(content);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &mut UiContext) {
        self.child.update(ctx);
    }

    fn draw(&self, theme: &UiTheme) {
        fill_rect(self.rect, theme.panel);
        if let Some((title, font)) = &self.title {
            let size = self.title_size;
            let bar = self.rect.slice_top(self.title_height());
            fill_rect(bar, theme.background);
            let baseline = bar.y + (bar.h - font.line_height(size)) * 0.5 + font.ascent(size);
            font.draw_run(title, bar.x + self.padding, baseline, size, 0.0, theme.text);
            draw_line(bar.x, bar.bottom(), bar.right(), bar.bottom(), 1.0, theme.border);
        }
        stroke_rect(self.rect, 1.0, theme.border);
        self.child.draw(theme);
    }

    fn apply_theme(&mut self, theme: &UiTheme) {
        self.padding = self.custom_padding.unwrap_or(theme.padding);
        self.title_size = self.custom_title_size.unwrap_or(theme.header_size);
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

/// Fixed-size gap
pub struct Spacer {
    id: WidgetId,
    size: Vec2,
    rect: Rect,
}

impl Spacer {
    pub fn new(w: f32, h: f32) -> Self {
        Self { id: WidgetId::auto(), size: vec2(w, h), rect: Rect::default() }
    }
}

impl Widget for Spacer {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, _max_width: f32) -> Vec2 {
        self.size
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, _theme: &UiTheme) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
