//! Rendering helpers
//!
//! Layout rectangles plus a handful of macroquad draw wrappers used by the
//! widgets: filled/outlined/rounded rects, progress bars and scissor clipping.

mod rect;
mod draw;

pub use rect::Rect;
pub use draw::*;
