//! Input handling with gamepad support
//!
//! Provides an action-based input system that works with both keyboard/mouse
//! and gamepad controllers. Actions are named strings bound to any mix of
//! keys, mouse buttons, pad buttons and stick directions.
//!
//! Native: uses gilrs for cross-platform gamepad input
//! WASM: keyboard and mouse only

mod binding;
mod gamepad;
mod handler;
mod keys;
mod pad;
mod source;

pub use binding::{Binding, BindingParseError};
pub use gamepad::Gamepads;
pub use handler::{action, ActionState, InputHandler};
pub use keys::{key_from_name, key_name};
pub use pad::{ControllerType, PadAxis, PadButton};
pub use source::{InputSource, MacroquadInput};
