//! Text input widget with proper cursor and keyboard handling

use macroquad::prelude::*;
use std::any::Any;
use crate::render::{fill_rect, stroke_rect, with_clip, Rect};
use crate::text::{draw_layout, layout, CaretPos, TextLayout, TextStyle, WrapOptions};
use super::widget::{FontRef, UiEvent, Widget, WidgetId};
use super::{KeyboardState, UiContext, UiTheme};

/// What a batch of keyboard input did to the text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditOutcome {
    pub changed: bool,
    /// Enter pressed in single-line mode
    pub submitted: bool,
    /// Caret or selection moved
    pub moved: bool,
}

/// Editable text with a byte-index cursor and optional selection
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Selection anchor (byte index), if selecting
    pub selection_start: Option<usize>,
    /// Blink timer for cursor
    pub blink_timer: f32,
    /// Maximum length in chars
    pub max_len: Option<usize>,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor, ..Default::default() }
    }

    /// Get selected text range (start, end) in sorted order
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_start?;
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn has_selection(&self) -> bool {
        self.selection_start.is_some_and(|a| a != self.cursor)
    }

    pub fn selected_text(&self) -> &str {
        match self.selection_range() {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    /// Delete selected text; cursor lands where it started
    pub fn delete_selection(&mut self) {
        if let Some((start, end)) = self.selection_range() {
            self.text.drain(start..end);
            self.cursor = start;
        }
        self.selection_start = None;
    }

    fn prev_boundary(&self, at: usize) -> usize {
        self.text[..at].char_indices().next_back().map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self, at: usize) -> usize {
        self.text[at..].chars().next().map_or(at, |ch| at + ch.len_utf8())
    }

    /// Move the cursor to `pos`, extending the selection or dropping it
    pub fn move_to(&mut self, pos: usize, extend_selection: bool) {
        let pos = pos.min(self.text.len());
        if extend_selection {
            self.selection_start.get_or_insert(self.cursor);
        } else {
            self.selection_start = None;
        }
        self.cursor = pos;
    }

    pub fn move_left(&mut self, extend_selection: bool) {
        match self.selection_range() {
            // Collapse an existing selection to its start
            Some((start, _)) if !extend_selection && self.has_selection() => self.move_to(start, false),
            _ => self.move_to(self.prev_boundary(self.cursor), extend_selection),
        }
    }

    pub fn move_right(&mut self, extend_selection: bool) {
        match self.selection_range() {
            Some((_, end)) if !extend_selection && self.has_selection() => self.move_to(end, false),
            _ => self.move_to(self.next_boundary(self.cursor), extend_selection),
        }
    }

    /// Start of the current line
    pub fn move_home(&mut self, extend_selection: bool) {
        let start = self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
        self.move_to(start, extend_selection);
    }

    /// End of the current line
    pub fn move_end(&mut self, extend_selection: bool) {
        let end = self.text[self.cursor..].find('\n').map_or(self.text.len(), |i| self.cursor + i);
        self.move_to(end, extend_selection);
    }

    pub fn select_all(&mut self) {
        self.selection_start = Some(0);
        self.cursor = self.text.len();
    }

    /// Insert text at cursor, replacing selection if any
    ///
    /// Truncated to fit `max_len`. Returns false if nothing changed.
    pub fn insert(&mut self, s: &str) -> bool {
        let had_selection = self.has_selection();
        self.delete_selection();
        let room = match self.max_len {
            Some(max) => max.saturating_sub(self.text.chars().count()),
            None => usize::MAX,
        };
        let end = s.char_indices().nth(room).map_or(s.len(), |(i, _)| i);
        let s = &s[..end];
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        had_selection || !s.is_empty()
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.has_selection() {
            self.delete_selection();
            return true;
        }
        self.selection_start = None;
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary(self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete character after cursor
    pub fn delete(&mut self) -> bool {
        if self.has_selection() {
            self.delete_selection();
            return true;
        }
        self.selection_start = None;
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = self.next_boundary(self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    /// Apply a frame of keyboard input
    ///
    /// Enter inserts a newline when `multiline`, otherwise it submits.
    pub fn apply(&mut self, keys: &KeyboardState, multiline: bool) -> EditOutcome {
        let mut out = EditOutcome::default();
        let shift = keys.shift;

        for key in &keys.pressed {
            match key {
                KeyCode::Left => {
                    self.move_left(shift);
                    out.moved = true;
                }
                KeyCode::Right => {
                    self.move_right(shift);
                    out.moved = true;
                }
                KeyCode::Home => {
                    self.move_home(shift);
                    out.moved = true;
                }
                KeyCode::End => {
                    self.move_end(shift);
                    out.moved = true;
                }
                KeyCode::A if keys.ctrl => {
                    self.select_all();
                    out.moved = true;
                }
                KeyCode::Backspace => out.changed |= self.backspace(),
                KeyCode::Delete => out.changed |= self.delete(),
                KeyCode::Enter | KeyCode::KpEnter => {
                    if multiline {
                        out.changed |= self.insert("\n");
                    } else {
                        out.submitted = true;
                    }
                }
                _ => {}
            }
        }

        if !keys.ctrl {
            for &ch in &keys.chars {
                // Filter control characters
                if ch >= ' ' && ch != '\u{7f}' {
                    let mut buf = [0u8; 4];
                    out.changed |= self.insert(ch.encode_utf8(&mut buf));
                }
            }
        }

        if out.changed || out.moved {
            self.blink_timer = 0.0;
        }
        out
    }
}

/// Single or multi-line text field
pub struct TextInput {
    id: WidgetId,
    pub state: TextInputState,
    font: FontRef,
    font_size: f32,
    multiline: bool,
    /// Visible rows a multi-line input asks for when empty
    min_lines: usize,
    placeholder: String,
    padding: f32,
    rect: Rect,
    laid_out: Option<TextLayout>,
    /// Horizontal scroll keeping the caret visible (single-line only)
    scroll_x: f32,
    focused: bool,
}

impl TextInput {
    pub fn new(id: WidgetId, font: FontRef, font_size: f32) -> Self {
        Self {
            id,
            state: TextInputState::default(),
            font,
            font_size,
            multiline: false,
            min_lines: 3,
            placeholder: String::new(),
            padding: 6.0,
            rect: Rect::default(),
            laid_out: None,
            scroll_x: 0.0,
            focused: false,
        }
    }

    /// Wrap text and accept newlines
    pub fn multiline(mut self, min_lines: usize) -> Self {
        self.multiline = true;
        self.min_lines = min_lines.max(1);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.state = TextInputState { max_len: self.state.max_len, ..TextInputState::new(text) };
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.state.max_len = Some(max);
        self
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
        self.state.cursor = self.state.text.len();
        self.state.selection_start = None;
        self.relayout();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn caret(&self) -> Option<CaretPos> {
        self.laid_out.as_ref()?.caret
    }

    fn wrap_width(&self) -> f32 {
        if self.multiline {
            (self.rect.w - self.padding * 2.0).max(1.0)
        } else {
            0.0
        }
    }

    fn wrap_options(&self, caret: usize) -> WrapOptions {
        WrapOptions::new(self.wrap_width(), self.font_size).caret(Some(caret))
    }

    fn caret_at(&self, byte: usize) -> Option<CaretPos> {
        layout(self.font.as_ref(), &self.state.text, &self.wrap_options(byte)).caret
    }

    /// Re-run the layout after text or caret changes
    fn relayout(&mut self) {
        let laid_out = layout(self.font.as_ref(), &self.state.text, &self.wrap_options(self.state.cursor));
        if !self.multiline {
            let inner = (self.rect.w - self.padding * 2.0).max(0.0);
            if let Some(caret) = laid_out.caret {
                if caret.x - self.scroll_x > inner {
                    self.scroll_x = caret.x - inner;
                } else if caret.x < self.scroll_x {
                    self.scroll_x = caret.x;
                }
            }
            self.scroll_x = self.scroll_x.min((laid_out.size.x - inner).max(0.0)).max(0.0);
        }
        self.laid_out = Some(laid_out);
    }

    /// Screen position of the layout's top-left corner
    fn text_origin(&self) -> Vec2 {
        let line_height = self.font.line_height(self.font_size);
        let y = if self.multiline {
            self.rect.y + self.padding
        } else {
            self.rect.y + (self.rect.h - line_height) * 0.5
        };
        vec2(self.rect.x + self.padding - self.scroll_x, y)
    }

    fn hit(&self, x: f32, y: f32) -> usize {
        let origin = self.text_origin();
        self.laid_out.as_ref().map_or(self.state.cursor, |l| l.hit_test(x - origin.x, y - origin.y))
    }

    /// Move the caret one visual line up or down
    fn move_vertical(&mut self, down: bool, extend: bool) {
        let Some(laid_out) = &self.laid_out else { return };
        let Some(caret) = laid_out.caret else { return };
        let y = if down {
            caret.y + laid_out.line_height * 1.5
        } else {
            caret.y - laid_out.line_height * 0.5
        };
        let target = if y < 0.0 { 0 } else { laid_out.hit_test(caret.x, y) };
        self.state.move_to(target, extend);
    }

    fn selection_rects(&self, origin: Vec2) -> Vec<Rect> {
        let Some(laid_out) = &self.laid_out else { return Vec::new() };
        let Some((start, end)) = self.state.selection_range().filter(|(s, e)| s < e) else {
            return Vec::new();
        };
        let (Some(a), Some(b)) = (self.caret_at(start), self.caret_at(end)) else {
            return Vec::new();
        };
        (a.line..=b.line)
            .filter_map(|i| {
                let line = laid_out.lines.get(i)?;
                let line_start = line.runs.first().map_or(0.0, |r| r.x);
                let line_end = line.runs.last().map_or(line_start, |r| r.x + r.width);
                let x0 = if i == a.line { a.x } else { line_start };
                // Show a sliver for selected line breaks
                let x1 = if i == b.line { b.x } else { line_end.max(x0 + 4.0) };
                Some(Rect::new(origin.x + x0, origin.y + line.y, x1 - x0, laid_out.line_height))
            })
            .collect()
    }
}

impl Widget for TextInput {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, max_width: f32) -> Vec2 {
        let line_height = self.font.line_height(self.font_size);
        if !self.multiline {
            return vec2(max_width, line_height + self.padding * 2.0);
        }
        let opts = WrapOptions::new((max_width - self.padding * 2.0).max(1.0), self.font_size);
        let text_h = layout(self.font.as_ref(), &self.state.text, &opts).size.y;
        let min_h = self.min_lines as f32 * line_height;
        vec2(max_width, text_h.max(min_h) + self.padding * 2.0)
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        self.relayout();
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &mut UiContext) {
        let hovered = ctx.hovering(&self.rect);
        if hovered {
            ctx.set_hot(self.id);
        }

        if ctx.mouse.left_pressed {
            if hovered {
                ctx.set_focus(Some(self.id));
                let pos = self.hit(ctx.mouse.x, ctx.mouse.y);
                self.state.move_to(pos, ctx.keyboard.shift);
                self.state.blink_timer = 0.0;
                ctx.start_drag(self.id);
                self.relayout();
            } else if ctx.is_focused(self.id) {
                ctx.set_focus(None);
            }
        } else if ctx.is_dragging(self.id) && ctx.mouse.left_down {
            // Drag-select
            let pos = self.hit(ctx.mouse.x, ctx.mouse.y);
            if pos != self.state.cursor {
                self.state.move_to(pos, true);
                self.relayout();
            }
        }

        self.focused = ctx.is_focused(self.id);
        if !self.focused {
            return;
        }

        self.state.blink_timer += ctx.dt;
        let keys = ctx.keyboard.clone();
        if keys.was_pressed(KeyCode::Escape) {
            self.state.selection_start = None;
            ctx.set_focus(None);
            self.focused = false;
            return;
        }

        let outcome = self.state.apply(&keys, self.multiline);
        let mut moved = outcome.moved;
        if self.multiline {
            for key in &keys.pressed {
                match key {
                    KeyCode::Up => self.move_vertical(false, keys.shift),
                    KeyCode::Down => self.move_vertical(true, keys.shift),
                    _ => continue,
                }
                moved = true;
                self.state.blink_timer = 0.0;
            }
        }

        if outcome.changed || moved {
            self.relayout();
        }
        if outcome.changed {
            ctx.emit(UiEvent::TextChanged(self.id));
        }
        if outcome.submitted {
            ctx.emit(UiEvent::TextSubmitted(self.id));
        }
    }

    fn draw(&self, theme: &UiTheme) {
        fill_rect(self.rect, theme.input);
        let border = if self.focused { theme.accent } else { theme.border };
        stroke_rect(self.rect, 1.0, border);

        let inner = self.rect.pad(self.padding * 0.5);
        let origin = self.text_origin();
        with_clip(inner, || {
            if self.state.text.is_empty() && !self.focused {
                let opts = WrapOptions::new(self.wrap_width(), self.font_size);
                let hint = layout(self.font.as_ref(), &self.placeholder, &opts);
                draw_layout(self.font.as_ref(), &hint, origin, &TextStyle::new(theme.text_dim));
                return;
            }

            for sel in self.selection_rects(origin) {
                fill_rect(sel, theme.selection);
            }

            let Some(laid_out) = &self.laid_out else { return };
            let mut style = TextStyle::new(theme.text);
            // Cursor blinks at 1Hz
            if self.focused && (self.state.blink_timer % 1.0) < 0.5 {
                style = style.caret(theme.caret);
            }
            draw_layout(self.font.as_ref(), laid_out, origin, &style);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
