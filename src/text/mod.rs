//! Text rendering
//!
//! - `font`: TTF and bitmap fonts behind the `FontMetrics`/`TextRenderer` traits
//! - `layout`: greedy word wrap with emphasis, caret tracking and size fitting
//! - `draw`: drawing a finished layout

mod draw;
mod font;
mod layout;

pub use draw::{draw_layout, draw_text_wrapped, TextStyle};
pub use font::{text_size, BitmapFont, FontMetrics, TextFont, TextRenderer};
pub use layout::{layout, layout_fit, Align, CaretPos, GlyphRun, LayoutLine, TextLayout, WrapOptions};
