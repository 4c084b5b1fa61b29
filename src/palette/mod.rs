//! Color palettes
//!
//! A palette is an ordered list of named colors. `PaletteHandler` holds a set
//! of palettes with one marked current, so a whole game can be re-skinned by
//! switching palettes at runtime. Palettes load from RON or JSON with colors
//! written as hex strings.

mod hex;

pub use hex::{parse_hex, to_bytes, to_hex};

use macroquad::prelude::{Color, MAGENTA};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use crate::serialize::{self, SerializeError};

/// Palette error types
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Color string isn't valid hex
    BadColor(String),
    /// No palette with this name
    UnknownPalette(String),
    /// Loading or saving failed
    Serialize(SerializeError),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::BadColor(s) => write!(f, "invalid hex color: {:?}", s),
            PaletteError::UnknownPalette(name) => write!(f, "unknown palette: {}", name),
            PaletteError::Serialize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PaletteError {}

impl From<SerializeError> for PaletteError {
    fn from(e: SerializeError) -> Self {
        PaletteError::Serialize(e)
    }
}

/// Ordered list of named colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PaletteDef", try_from = "PaletteDef")]
pub struct Palette {
    pub name: String,
    colors: Vec<(String, Color)>,
}

impl Palette {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), colors: Vec::new() }
    }

    /// Builder form of `set`
    pub fn with(mut self, name: &str, color: Color) -> Self {
        self.set(name, color);
        self
    }

    /// Replace a color by name, or append it
    pub fn set(&mut self, name: &str, color: Color) {
        match self.colors.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => *c = color,
            None => self.colors.push((name.to_string(), color)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    /// Color by index, wrapping around (handy for cycling team colors)
    pub fn at(&self, index: usize) -> Option<Color> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()].1)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Default dark editor theme
    pub fn dark() -> Self {
        Palette::new("dark")
            .with("background", Color::new(0.11, 0.11, 0.13, 1.0))
            .with("panel", Color::new(0.15, 0.15, 0.18, 1.0))
            .with("text", Color::new(0.8, 0.8, 0.85, 1.0))
            .with("text_dim", Color::new(0.4, 0.4, 0.45, 1.0))
            .with("accent", Color::new(0.0, 0.75, 0.9, 1.0))
            .with("emphasis", Color::new(0.9, 0.85, 0.5, 1.0))
            .with("border", Color::new(0.314, 0.314, 0.314, 1.0))
            .with("hover", Color::new(0.235, 0.314, 0.392, 1.0))
            .with("pressed", Color::new(0.235, 0.235, 0.275, 1.0))
            .with("input", Color::new(0.12, 0.12, 0.14, 1.0))
            .with("selection", Color::new(0.0, 0.5, 0.7, 0.5))
            .with("caret", Color::new(0.9, 0.9, 0.95, 1.0))
    }

    /// Light counterpart of `dark`, same color names
    pub fn light() -> Self {
        Palette::new("light")
            .with("background", Color::new(0.93, 0.93, 0.95, 1.0))
            .with("panel", Color::new(0.85, 0.85, 0.88, 1.0))
            .with("text", Color::new(0.1, 0.1, 0.12, 1.0))
            .with("text_dim", Color::new(0.45, 0.45, 0.5, 1.0))
            .with("accent", Color::new(0.0, 0.45, 0.75, 1.0))
            .with("emphasis", Color::new(0.7, 0.3, 0.1, 1.0))
            .with("border", Color::new(0.6, 0.6, 0.62, 1.0))
            .with("hover", Color::new(0.75, 0.82, 0.9, 1.0))
            .with("pressed", Color::new(0.68, 0.7, 0.75, 1.0))
            .with("input", Color::new(1.0, 1.0, 1.0, 1.0))
            .with("selection", Color::new(0.3, 0.6, 0.9, 0.4))
            .with("caret", Color::new(0.05, 0.05, 0.08, 1.0))
    }
}

/// On-disk form of a palette: colors as hex strings, order preserved
#[derive(Serialize, Deserialize)]
struct PaletteDef {
    name: String,
    colors: Vec<(String, String)>,
}

impl From<Palette> for PaletteDef {
    fn from(p: Palette) -> Self {
        Self {
            name: p.name,
            colors: p.colors.into_iter().map(|(n, c)| (n, to_hex(c))).collect(),
        }
    }
}

impl TryFrom<PaletteDef> for Palette {
    type Error = PaletteError;

    fn try_from(def: PaletteDef) -> Result<Self, Self::Error> {
        let mut palette = Palette::new(def.name);
        for (name, hex) in def.colors {
            palette.set(&name, parse_hex(&hex)?);
        }
        Ok(palette)
    }
}

/// Set of palettes with one current
#[derive(Debug, Clone)]
pub struct PaletteHandler {
    palettes: Vec<Palette>,
    current: usize,
    /// Names already reported missing, so the warning logs once
    warned: HashSet<String>,
}

impl PaletteHandler {
    /// Handler with the built-in `dark` and `light` palettes, `dark` current
    pub fn new() -> Self {
        Self {
            palettes: vec![Palette::dark(), Palette::light()],
            current: 0,
            warned: HashSet::new(),
        }
    }

    /// Add a palette, replacing any with the same name
    pub fn add(&mut self, palette: Palette) {
        match self.palettes.iter().position(|p| p.name == palette.name) {
            Some(i) => self.palettes[i] = palette,
            None => self.palettes.push(palette),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.palettes.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    pub fn current(&self) -> &Palette {
        &self.palettes[self.current]
    }

    pub fn set_current(&mut self, name: &str) -> Result<(), PaletteError> {
        let index = self
            .palettes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| PaletteError::UnknownPalette(name.to_string()))?;
        self.current = index;
        log::info!("palette switched to {}", name);
        Ok(())
    }

    /// Switch to the next palette (wraps)
    pub fn next(&mut self) -> &Palette {
        self.current = (self.current + 1) % self.palettes.len();
        self.current()
    }

    /// Switch to the previous palette (wraps)
    pub fn prev(&mut self) -> &Palette {
        self.current = (self.current + self.palettes.len() - 1) % self.palettes.len();
        self.current()
    }

    /// Color from the current palette
    ///
    /// Missing names draw as magenta so they stand out on screen.
    pub fn color(&mut self, name: &str) -> Color {
        if let Some(c) = self.current().get(name) {
            return c;
        }
        if self.warned.insert(name.to_string()) {
            log::warn!("palette {:?} has no color {:?}", self.current().name, name);
        }
        MAGENTA
    }

    /// Load palettes from a RON/JSON file (a list of palettes) and add them
    ///
    /// Returns how many palettes were loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, PaletteError> {
        let loaded: Vec<Palette> = serialize::load(path.as_ref())?;
        let count = loaded.len();
        for palette in loaded {
            self.add(palette);
        }
        log::info!("loaded {} palettes from {}", count, path.as_ref().display());
        Ok(count)
    }

    /// Save all palettes to a RON/JSON file
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), PaletteError> {
        serialize::save(path, &self.palettes)?;
        Ok(())
    }
}

impl Default for PaletteHandler {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL: Mutex<PaletteHandler> = Mutex::new(PaletteHandler::new());
}

/// Run `f` with the global palette handler
pub fn with_global<R>(f: impl FnOnce(&mut PaletteHandler) -> R) -> R {
    let mut handler = GLOBAL.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut handler)
}

/// Color from the global handler's current palette
pub fn color(name: &str) -> Color {
    with_global(|h| h.color(name))
}
