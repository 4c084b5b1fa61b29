//! quadkit: 2D game support library on top of macroquad
//!
//! Independent modules for a single-threaded, frame-based game loop:
//! - `text`: fonts and a word-wrapping layout engine (emphasis, caret, size fitting)
//! - `ui`: retained widget trees (labels, buttons, text inputs, scroll views)
//! - `input`: keyboard/mouse/gamepad bindings mapped to named actions
//! - `palette`: named color sets, switchable at runtime
//! - `render`: layout rects and draw helpers
//! - `rng`, `pool`, `serialize`: seeded randomness, object reuse, RON/JSON files

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod input;
pub mod logging;
pub mod palette;
pub mod pool;
pub mod render;
pub mod rng;
pub mod serialize;
pub mod text;
pub mod ui;
