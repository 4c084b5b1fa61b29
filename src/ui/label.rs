//! Wrapped text label

use macroquad::prelude::*;
use std::any::Any;
use crate::render::Rect;
use crate::text::{draw_layout, layout, layout_fit, Align, TextLayout, TextStyle, WrapOptions};
use super::widget::{FontRef, Widget, WidgetId};
use super::UiTheme;

/// Static text, wrapped to the width it's given
///
/// Text between emphasis markers (`*` by default) draws in the theme's
/// emphasis color.
pub struct Label {
    id: WidgetId,
    text: String,
    font: FontRef,
    opts: WrapOptions,
    dim: bool,
    /// Shrink the font to fit the assigned height
    fit: bool,
    rect: Rect,
    laid_out: Option<TextLayout>,
}

impl Label {
    pub fn new(text: impl Into<String>, font: FontRef, font_size: f32) -> Self {
        Self {
            id: WidgetId::auto(),
            text: text.into(),
            font,
            opts: WrapOptions::new(0.0, font_size).emphasis('*'),
            dim: false,
            fit: false,
            rect: Rect::default(),
            laid_out: None,
        }
    }

    pub fn with_id(mut self, id: WidgetId) -> Self {
        self.id = id;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.opts.align = align;
        self
    }

    pub fn spacing(mut self, letter: f32, line: f32) -> Self {
        self.opts = self.opts.spacing(letter, line);
        self
    }

    /// Draw in the dimmed text color
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Disable emphasis markers (text is drawn literally)
    pub fn plain(mut self) -> Self {
        self.opts.emphasis_marker = None;
        self
    }

    /// Shrink the font (down to `min_size`) when the text overflows its rect
    pub fn fit(mut self, min_size: f32) -> Self {
        self.fit = true;
        self.opts.min_font_size = min_size;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.laid_out = None;
    }

    pub fn text_layout(&self) -> Option<&TextLayout> {
        self.laid_out.as_ref()
    }
}

impl Widget for Label {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, max_width: f32) -> Vec2 {
        let opts = WrapOptions { max_width, ..self.opts.clone() };
        let size = layout(self.font.as_ref(), &self.text, &opts).size;
        vec2(size.x, size.y.max(self.font.line_height(self.opts.font_size)))
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        let mut opts = WrapOptions { max_width: rect.w, ..self.opts.clone() };
        if self.fit {
            opts.max_height = Some(rect.h);
        }
        self.laid_out = Some(layout_fit(self.font.as_ref(), &self.text, &opts));
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, theme: &UiTheme) {
        let Some(laid_out) = &self.laid_out else { return };
        let color = if self.dim { theme.text_dim } else { theme.text };
        let style = TextStyle::new(color).emphasis(theme.emphasis);
        draw_layout(self.font.as_ref(), laid_out, vec2(self.rect.x, self.rect.y), &style);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
