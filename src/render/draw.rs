//! Drawing helpers over macroquad primitives

use macroquad::prelude::*;
use std::cell::RefCell;
use super::Rect;

thread_local! {
    static CLIP_STACK: RefCell<Vec<Rect>> = const { RefCell::new(Vec::new()) };
}

/// Fill a rectangle
pub fn fill_rect(rect: Rect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
}

/// Outline a rectangle
pub fn stroke_rect(rect: Rect, thickness: f32, color: Color) {
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
}

/// Draw a rounded rectangle (overlapping rects plus corner circles)
pub fn rounded_rect(rect: Rect, radius: f32, color: Color) {
    let r = radius.min(rect.w * 0.5).min(rect.h * 0.5).max(0.0);
    if r <= 0.0 {
        fill_rect(rect, color);
        return;
    }
    let Rect { x, y, w, h } = rect;
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Horizontal progress bar, `t` is clamped to 0..1
pub fn progress_bar(rect: Rect, t: f32, bg: Color, fg: Color) {
    fill_rect(rect, bg);
    let filled = rect.w * t.clamp(0.0, 1.0);
    if filled > 0.0 {
        fill_rect(Rect::new(rect.x, rect.y, filled, rect.h), fg);
    }
}

/// Draw single-line text centered in a rect using the default font
pub fn draw_text_centered(text: &str, rect: Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp rendering
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Run `f` with drawing clipped to `rect`
///
/// Nested clips intersect with the enclosing one.
pub fn with_clip<R>(rect: Rect, f: impl FnOnce() -> R) -> R {
    let clip = CLIP_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let clip = match stack.last() {
            Some(outer) => outer.intersect(&rect).unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        stack.push(clip);
        clip
    });
    apply_scissor(Some(clip));

    let result = f();

    let outer = CLIP_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();
        stack.last().copied()
    });
    apply_scissor(outer);
    result
}

fn apply_scissor(rect: Option<Rect>) {
    let dpi = screen_dpi_scale();
    gl_use_default_material();
    let scissor = rect.map(|r| {
        (
            (r.x * dpi) as i32,
            (r.y * dpi) as i32,
            (r.w * dpi) as i32,
            (r.h * dpi) as i32,
        )
    });
    // SAFETY: called from the main thread during a frame, same as every macroquad draw call
    unsafe {
        get_internal_gl().quad_gl.scissor(scissor);
    }
}
