//! Fonts: TTF via macroquad and fixed-cell bitmap atlases

use macroquad::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;

/// Glyph measurements needed for layout
pub trait FontMetrics {
    /// Horizontal advance of one glyph at `size` pixels
    fn advance(&self, ch: char, size: f32) -> f32;

    /// Height of one line at `size`
    fn line_height(&self, size: f32) -> f32;

    /// Distance from the top of a line to the baseline
    fn ascent(&self, size: f32) -> f32;
}

/// A font that can also draw
pub trait TextRenderer: FontMetrics {
    fn draw_glyph(&self, ch: char, x: f32, baseline: f32, size: f32, color: Color);

    /// Draw a run glyph by glyph so letter spacing applies
    fn draw_run(&self, text: &str, x: f32, baseline: f32, size: f32, letter_spacing: f32, color: Color) {
        let mut pen = x;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                self.draw_glyph(ch, pen, baseline, size, color);
            }
            pen += self.advance(ch, size) + letter_spacing;
        }
    }
}

/// Split a float size into macroquad's integer font size plus scale
fn font_px(size: f32) -> (u16, f32) {
    let px = size.round().max(1.0);
    (px as u16, size / px)
}

/// TrueType font (or macroquad's built-in font when `font` is `None`)
pub struct TextFont {
    font: Option<Font>,
    /// Advance cache keyed by (char, size in 1/8 px)
    advances: RefCell<HashMap<(char, u32), f32>>,
}

impl TextFont {
    pub fn new(font: Font) -> Self {
        Self { font: Some(font), advances: RefCell::new(HashMap::new()) }
    }

    /// macroquad's embedded default font
    pub fn builtin() -> Self {
        Self { font: None, advances: RefCell::new(HashMap::new()) }
    }

    /// Load a .ttf file
    pub async fn load(path: &str) -> Result<Self, macroquad::Error> {
        let font = load_ttf_font(path).await?;
        log::info!("loaded font {}", path);
        Ok(Self::new(font))
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }
}

impl FontMetrics for TextFont {
    fn advance(&self, ch: char, size: f32) -> f32 {
        let key = (ch, (size * 8.0).round() as u32);
        if let Some(w) = self.advances.borrow().get(&key) {
            return *w;
        }
        let (px, scale) = font_px(size);
        let mut buf = [0u8; 4];
        let w = measure_text(ch.encode_utf8(&mut buf), self.font.as_ref(), px, scale).width;
        self.advances.borrow_mut().insert(key, w);
        w
    }

    fn line_height(&self, size: f32) -> f32 {
        size
    }

    fn ascent(&self, size: f32) -> f32 {
        size * 0.8
    }
}

impl TextRenderer for TextFont {
    fn draw_glyph(&self, ch: char, x: f32, baseline: f32, size: f32, color: Color) {
        let (px, scale) = font_px(size);
        let mut buf = [0u8; 4];
        draw_text_ex(
            ch.encode_utf8(&mut buf),
            x.round(),
            baseline.round(),
            TextParams {
                font: self.font.as_ref(),
                font_size: px,
                font_scale: scale,
                color,
                ..Default::default()
            },
        );
    }
}

/// Fixed-cell glyph atlas
///
/// Glyphs are laid out left-to-right, top-to-bottom starting at
/// `first_char`. Sizes scale relative to the cell height, so a font with
/// 8px cells drawn at size 16 is doubled.
pub struct BitmapFont {
    texture: Option<Texture2D>,
    cell_w: f32,
    cell_h: f32,
    columns: u32,
    first_char: char,
    glyph_count: u32,
    /// Per-glyph advance in cell pixels (proportional bitmap fonts)
    advances: Option<Vec<f32>>,
    fallback: char,
}

impl BitmapFont {
    /// Metrics for printable ASCII without a texture; lays out but draws nothing
    pub fn metrics_only(cell_w: f32, cell_h: f32) -> Self {
        Self {
            texture: None,
            cell_w,
            cell_h,
            columns: 16,
            first_char: ' ',
            glyph_count: 95,
            advances: None,
            fallback: '?',
        }
    }

    /// Atlas from a texture whose size is a multiple of the cell size
    pub fn from_texture(texture: Texture2D, cell_w: f32, cell_h: f32, first_char: char) -> Self {
        texture.set_filter(FilterMode::Nearest);
        let columns = ((texture.width() / cell_w) as u32).max(1);
        let rows = ((texture.height() / cell_h) as u32).max(1);
        Self {
            texture: Some(texture),
            cell_w,
            cell_h,
            columns,
            first_char,
            glyph_count: columns * rows,
            advances: None,
            fallback: '?',
        }
    }

    /// Load an atlas image
    pub async fn load(path: &str, cell_w: f32, cell_h: f32, first_char: char) -> Result<Self, macroquad::Error> {
        let texture = load_texture(path).await?;
        log::info!("loaded bitmap font {}", path);
        Ok(Self::from_texture(texture, cell_w, cell_h, first_char))
    }

    /// Per-glyph advances (in cell pixels), indexed from `first_char`
    pub fn with_advances(mut self, advances: Vec<f32>) -> Self {
        self.advances = Some(advances);
        self
    }

    /// Character drawn in place of glyphs the atlas doesn't have
    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = fallback;
        self
    }

    fn index_of(&self, ch: char) -> Option<u32> {
        let offset = (ch as u32).checked_sub(self.first_char as u32)?;
        (offset < self.glyph_count).then_some(offset)
    }

    /// Atlas index for a char, substituting the fallback
    fn glyph_index(&self, ch: char) -> Option<u32> {
        self.index_of(ch).or_else(|| self.index_of(self.fallback))
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.cell_h
    }
}

impl FontMetrics for BitmapFont {
    fn advance(&self, ch: char, size: f32) -> f32 {
        let cell_advance = self
            .glyph_index(ch)
            .and_then(|i| self.advances.as_ref()?.get(i as usize).copied())
            .unwrap_or(self.cell_w);
        cell_advance * self.scale(size)
    }

    fn line_height(&self, size: f32) -> f32 {
        size
    }

    fn ascent(&self, size: f32) -> f32 {
        size
    }
}

impl TextRenderer for BitmapFont {
    fn draw_glyph(&self, ch: char, x: f32, baseline: f32, size: f32, color: Color) {
        let Some(texture) = &self.texture else { return };
        let Some(index) = self.glyph_index(ch) else { return };
        let scale = self.scale(size);
        let col = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        draw_texture_ex(
            texture,
            x.round(),
            (baseline - self.ascent(size)).round(),
            color,
            DrawTextureParams {
                dest_size: Some(vec2(self.cell_w * scale, self.cell_h * scale)),
                source: Some(macroquad::math::Rect::new(col * self.cell_w, row * self.cell_h, self.cell_w, self.cell_h)),
                ..Default::default()
            },
        );
    }
}

/// Size of a block of text without wrapping (GetTextSize)
///
/// Width is the widest `\n`-separated line, height is lines × line height.
/// Empty text measures (0, 0).
pub fn text_size<F: FontMetrics + ?Sized>(font: &F, text: &str, size: f32, letter_spacing: f32) -> Vec2 {
    if text.is_empty() {
        return Vec2::ZERO;
    }
    let mut width = 0.0f32;
    let mut lines = 0;
    for line in text.split('\n') {
        lines += 1;
        let count = line.chars().count();
        let advance: f32 = line.chars().map(|ch| font.advance(ch, size)).sum();
        let spacing = letter_spacing * count.saturating_sub(1) as f32;
        width = width.max(advance + spacing);
    }
    Vec2::new(width, lines as f32 * font.line_height(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_empty() {
        let font = BitmapFont::metrics_only(8.0, 8.0);
        assert_eq!(text_size(&font, "", 8.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_text_size_lines_and_spacing() {
        let font = BitmapFont::metrics_only(8.0, 8.0);
        let size = text_size(&font, "abc\nde", 16.0, 2.0);
        // Widest line: 3 glyphs × 16px + 2 gaps × 2px
        assert!((size.x - 52.0).abs() < 0.001);
        assert!((size.y - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_bitmap_fallback_and_advances() {
        let font = BitmapFont::metrics_only(8.0, 8.0).with_advances(vec![4.0; 95]);
        assert!((font.advance('A', 8.0) - 4.0).abs() < 0.001);
        // Outside the atlas: uses the fallback glyph's advance
        assert!((font.advance('é', 16.0) - 8.0).abs() < 0.001);
        assert_eq!(font.glyph_index('é'), font.glyph_index('?'));
    }

    #[test]
    fn test_font_px() {
        assert_eq!(font_px(12.0), (12, 1.0));
        let (px, scale) = font_px(12.4);
        assert_eq!(px, 12);
        assert!((px as f32 * scale - 12.4).abs() < 0.001);
    }
}
