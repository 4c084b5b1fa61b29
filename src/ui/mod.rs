//! Retained widget trees
//!
//! Each frame `UiRoot::frame` lays the tree out top-down and then lets every
//! widget handle input, collecting `UiEvent`s the caller reacts to. Drawing
//! is a separate pass so the game can interleave its own rendering.
//!
//! Widgets hold their own state (text, scroll offsets); look them up by
//! `WidgetId` with `UiRoot::find_mut`.

mod button;
mod container;
mod input;
mod label;
mod panel;
mod root;
mod scroll_view;
mod text_input;
mod theme;
mod widget;

pub use button::Button;
pub use container::{Container, CrossAlign, Direction};
pub use input::{KeyboardState, MouseState, UiContext};
pub use label::Label;
pub use panel::{Panel, Spacer};
pub use root::UiRoot;
pub use scroll_view::ScrollView;
pub use text_input::{EditOutcome, TextInput, TextInputState};
pub use theme::{UiTheme, FONT_SIZE_HEADER};
pub use widget::{apply_theme, find, find_mut, FontRef, UiEvent, Widget, WidgetId};
