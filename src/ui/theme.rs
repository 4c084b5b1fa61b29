//! UI Theme - Shared colors and styling constants
//!
//! Colors come from a `Palette`, so swapping palettes restyles every widget.

use macroquad::prelude::Color;
use crate::palette::Palette;

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 14.0;

/// Colors and metrics widgets draw with
///
/// Colors are read at draw time. Metrics reach widgets through
/// `apply_theme`, and anything set on a widget directly wins.
#[derive(Debug, Clone, PartialEq)]
pub struct UiTheme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub emphasis: Color,
    pub border: Color,
    pub hover: Color,
    pub pressed: Color,
    pub input: Color,
    pub selection: Color,
    pub caret: Color,

    /// Panel title size
    pub header_size: f32,
    pub padding: f32,
    pub spacing: f32,
    pub corner_radius: f32,
    pub scrollbar_width: f32,
}

impl UiTheme {
    /// Pull the theme's colors out of `palette`
    ///
    /// Names the palette doesn't define keep the dark defaults.
    pub fn from_palette(palette: &Palette) -> Self {
        let mut theme = Self::dark_defaults();
        let slots: [(&str, &mut Color); 12] = [
            ("background", &mut theme.background),
            ("panel", &mut theme.panel),
            ("text", &mut theme.text),
            ("text_dim", &mut theme.text_dim),
            ("accent", &mut theme.accent),
            ("emphasis", &mut theme.emphasis),
            ("border", &mut theme.border),
            ("hover", &mut theme.hover),
            ("pressed", &mut theme.pressed),
            ("input", &mut theme.input),
            ("selection", &mut theme.selection),
            ("caret", &mut theme.caret),
        ];
        for (name, slot) in slots {
            if let Some(color) = palette.get(name) {
                *slot = color;
            }
        }
        theme
    }

    pub fn with_header_size(mut self, size: f32) -> Self {
        self.header_size = size;
        self
    }

    fn dark_defaults() -> Self {
        Self {
            background: Color::new(0.11, 0.11, 0.13, 1.0),
            panel: Color::new(0.15, 0.15, 0.18, 1.0),
            text: Color::new(0.8, 0.8, 0.85, 1.0),
            text_dim: Color::new(0.4, 0.4, 0.45, 1.0),
            accent: Color::new(0.0, 0.75, 0.9, 1.0),
            emphasis: Color::new(0.9, 0.85, 0.5, 1.0),
            border: Color::new(0.314, 0.314, 0.314, 1.0),
            hover: Color::new(0.235, 0.314, 0.392, 1.0),
            pressed: Color::new(0.235, 0.235, 0.275, 1.0),
            input: Color::new(0.12, 0.12, 0.14, 1.0),
            selection: Color::new(0.0, 0.5, 0.7, 0.5),
            caret: Color::new(0.9, 0.9, 0.95, 1.0),
            header_size: FONT_SIZE_HEADER,
            padding: 8.0,
            spacing: 4.0,
            corner_radius: 4.0,
            scrollbar_width: 8.0,
        }
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::dark_defaults()
    }
}
