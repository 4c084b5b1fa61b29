//! Drawing laid-out text

use macroquad::prelude::*;
use super::font::TextRenderer;
use super::layout::{layout_fit, TextLayout, WrapOptions};

/// Colors for drawing a layout
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub color: Color,
    pub emphasis_color: Color,
    /// Caret is only drawn when set and the layout has a caret
    pub caret_color: Option<Color>,
    pub caret_width: f32,
}

impl TextStyle {
    pub fn new(color: Color) -> Self {
        Self { color, emphasis_color: color, caret_color: None, caret_width: 1.5 }
    }

    pub fn emphasis(mut self, color: Color) -> Self {
        self.emphasis_color = color;
        self
    }

    pub fn caret(mut self, color: Color) -> Self {
        self.caret_color = Some(color);
        self
    }
}

/// Draw a layout with its top-left corner at `pos`
pub fn draw_layout(font: &dyn TextRenderer, layout: &TextLayout, pos: Vec2, style: &TextStyle) {
    let ascent = font.ascent(layout.font_size);
    for line in &layout.lines {
        let baseline = pos.y + line.y + ascent;
        for run in &line.runs {
            let color = if run.emphasized { style.emphasis_color } else { style.color };
            font.draw_run(&run.text, pos.x + run.x, baseline, layout.font_size, layout.letter_spacing, color);
        }
    }

    if let (Some(caret), Some(color)) = (layout.caret, style.caret_color) {
        let x = (pos.x + caret.x).round();
        let y = pos.y + caret.y;
        draw_line(x, y, x, y + layout.line_height, style.caret_width, color);
    }
}

/// Lay out (with size fitting when `opts.max_height` is set) and draw in one call
///
/// Returns the layout so callers can reuse its size or caret.
pub fn draw_text_wrapped(
    font: &dyn TextRenderer,
    text: &str,
    pos: Vec2,
    opts: &WrapOptions,
    style: &TextStyle,
) -> TextLayout {
    let layout = layout_fit(font, text, opts);
    draw_layout(font, &layout, pos, style);
    layout
}
