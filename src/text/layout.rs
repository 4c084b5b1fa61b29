//! Word-wrapping text layout
//!
//! Greedy single pass: words are placed left to right and a line breaks when
//! the next word would overflow `max_width`. On top of plain wrapping the
//! layout tracks:
//! - emphasis: a marker char toggles emphasized runs (`"press ^Enter^"`),
//!   a doubled marker is a literal
//! - a caret: a byte index into the source resolved to a line and x offset
//! - font-size fitting: `layout_fit` shrinks the size until the text fits
//!   a height budget
//!
//! Layout only needs `FontMetrics`, so it runs without a window.

use macroquad::prelude::Vec2;
use std::ops::Range;
use super::font::FontMetrics;

/// Horizontal alignment of each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Layout parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WrapOptions {
    /// Wrap width; `<= 0` disables wrapping
    pub max_width: f32,
    pub font_size: f32,
    /// Extra space between glyphs
    pub letter_spacing: f32,
    /// Extra space between lines
    pub line_spacing: f32,
    pub align: Align,
    /// Char that toggles emphasis; not rendered
    pub emphasis_marker: Option<char>,
    /// Byte index into the source text
    pub caret: Option<usize>,
    /// Height budget for `layout_fit`
    pub max_height: Option<f32>,
    pub min_font_size: f32,
    pub scale_step: f32,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            max_width: 0.0,
            font_size: 16.0,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            align: Align::Left,
            emphasis_marker: None,
            caret: None,
            max_height: None,
            min_font_size: 8.0,
            scale_step: 1.0,
        }
    }
}

impl WrapOptions {
    pub fn new(max_width: f32, font_size: f32) -> Self {
        Self { max_width, font_size, ..Default::default() }
    }

    pub fn spacing(mut self, letter: f32, line: f32) -> Self {
        self.letter_spacing = letter;
        self.line_spacing = line;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn emphasis(mut self, marker: char) -> Self {
        self.emphasis_marker = Some(marker);
        self
    }

    pub fn caret(mut self, caret: Option<usize>) -> Self {
        self.caret = caret;
        self
    }

    /// Allow `layout_fit` to shrink from `font_size` down to `min_size` to fit `max_height`
    pub fn fit(mut self, max_height: f32, min_size: f32) -> Self {
        self.max_height = Some(max_height);
        self.min_font_size = min_size;
        self
    }
}

/// Consecutive glyphs on one line sharing a style
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub text: String,
    /// Offset from the layout origin
    pub x: f32,
    pub width: f32,
    pub emphasized: bool,
}

/// One laid-out line
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub runs: Vec<GlyphRun>,
    /// Width excluding trailing whitespace
    pub width: f32,
    /// Top of the line relative to the layout origin
    pub y: f32,
    /// Byte range of the source covered by this line
    pub source: Range<usize>,
    /// Caret stops: (x, source byte index), ascending x
    stops: Vec<(f32, usize)>,
}

impl LayoutLine {
    /// Text of the line with emphasis markers removed
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Caret position resolved against a layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretPos {
    pub line: usize,
    pub x: f32,
    /// Top of the caret's line
    pub y: f32,
}

/// Result of laying out a block of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LayoutLine>,
    /// Bounding size (widest line × total height)
    pub size: Vec2,
    /// Font size actually used (may be smaller than requested after fitting)
    pub font_size: f32,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub caret: Option<CaretPos>,
}

impl TextLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Source byte index of the caret stop nearest to a point (layout-relative)
    pub fn hit_test(&self, x: f32, y: f32) -> usize {
        let Some(last) = self.lines.last() else { return 0 };
        let line = self
            .lines
            .iter()
            .find(|l| y < l.y + self.line_height)
            .unwrap_or(last);
        line.stops
            .iter()
            .min_by(|a, b| (a.0 - x).abs().total_cmp(&(b.0 - x).abs()))
            .map(|s| s.1)
            .unwrap_or(line.source.start)
    }
}

/// A character after emphasis markers are resolved
#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    src: usize,
    emphasized: bool,
    advance: f32,
}

/// Where a glyph ended up
#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    /// On `line` at x (before alignment)
    Placed { line: usize, x: f32 },
    /// Whitespace swallowed by a wrap
    Collapsed,
    /// Hard newline ending `line`
    Break { line: usize },
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n'
}

/// Strip emphasis markers and measure every glyph
fn resolve_glyphs<F: FontMetrics + ?Sized>(font: &F, text: &str, opts: &WrapOptions) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut emphasized = false;
    let mut chars = text.char_indices().peekable();

    while let Some((src, ch)) = chars.next() {
        if Some(ch) == opts.emphasis_marker {
            // Doubled marker renders one literal marker
            if chars.peek().map(|(_, c)| *c) == Some(ch) {
                chars.next();
            } else {
                emphasized = !emphasized;
                continue;
            }
        }
        let advance = if ch == '\n' { 0.0 } else { font.advance(ch, opts.font_size) };
        glyphs.push(Glyph { ch, src, emphasized, advance });
    }
    glyphs
}

/// Builds lines glyph by glyph
struct LineBreaker<'a> {
    glyphs: &'a [Glyph],
    placements: Vec<Placement>,
    max_width: f32,
    spacing: f32,
    line: usize,
    pen: f32,
    /// Line has at least one placed glyph
    started: bool,
}

impl<'a> LineBreaker<'a> {
    fn place(&mut self, i: usize) {
        self.placements[i] = Placement::Placed { line: self.line, x: self.pen };
        self.pen += self.glyphs[i].advance + self.spacing;
        self.started = true;
    }

    fn wrap(&mut self) {
        self.line += 1;
        self.pen = 0.0;
        self.started = false;
    }

    /// Width a glyph range would occupy when placed at the pen
    fn span_width(&self, range: Range<usize>) -> f32 {
        let n = range.len();
        let adv: f32 = self.glyphs[range].iter().map(|g| g.advance).sum();
        adv + self.spacing * n.saturating_sub(1) as f32
    }

    fn fits(&self, extra: f32) -> bool {
        self.max_width <= 0.0 || self.pen + extra <= self.max_width + 0.001
    }

    fn run(mut self) -> (Vec<Placement>, usize) {
        let n = self.glyphs.len();
        let mut i = 0;
        while i < n {
            let g = self.glyphs[i];
            if g.ch == '\n' {
                self.placements[i] = Placement::Break { line: self.line };
                self.wrap();
                i += 1;
                continue;
            }

            // Whitespace run followed by a word
            let space_end = (i..n).find(|&j| !is_space(self.glyphs[j].ch)).unwrap_or(n);
            let word_end = (space_end..n)
                .find(|&j| is_space(self.glyphs[j].ch) || self.glyphs[j].ch == '\n')
                .unwrap_or(n);
            let spaces = i..space_end;
            let word = space_end..word_end;

            let space_w: f32 = self.glyphs[spaces.clone()].iter().map(|g| g.advance + self.spacing).sum();
            let word_w = self.span_width(word.clone());

            if word.is_empty() {
                // Trailing whitespace before a newline or end: keep it, it can't cause a wrap
                for j in spaces {
                    self.place(j);
                }
                i = space_end;
                continue;
            }

            if self.started && !self.fits(space_w + word_w) {
                for j in spaces {
                    self.placements[j] = Placement::Collapsed;
                }
                self.wrap();
            } else if !self.started && !self.fits(space_w + word_w) && self.fits(word_w) {
                // Leading spaces would force a fitting word to split: drop them
                for j in spaces {
                    self.placements[j] = Placement::Collapsed;
                }
            } else {
                for j in spaces {
                    self.place(j);
                }
            }

            if self.fits(word_w) {
                for j in word {
                    self.place(j);
                }
            } else {
                // Word longer than the line (or the leftover space): split by char,
                // always placing at least one glyph per line
                for j in word {
                    if self.started && !self.fits(self.glyphs[j].advance) {
                        self.wrap();
                    }
                    self.place(j);
                }
            }
            i = word_end;
        }
        let line_count = self.line + 1;
        (self.placements, line_count)
    }
}

/// Lay out text with greedy word wrapping
pub fn layout<F: FontMetrics + ?Sized>(font: &F, text: &str, opts: &WrapOptions) -> TextLayout {
    let line_height = font.line_height(opts.font_size);
    let pitch = line_height + opts.line_spacing;
    let glyphs = resolve_glyphs(font, text, opts);

    if glyphs.is_empty() {
        let caret = opts.caret.map(|_| CaretPos {
            line: 0,
            x: align_offset(opts, 0.0, 0.0),
            y: 0.0,
        });
        return TextLayout {
            lines: Vec::new(),
            size: Vec2::ZERO,
            font_size: opts.font_size,
            letter_spacing: opts.letter_spacing,
            line_height,
            caret,
        };
    }

    let breaker = LineBreaker {
        glyphs: &glyphs,
        placements: vec![Placement::Collapsed; glyphs.len()],
        max_width: opts.max_width,
        spacing: opts.letter_spacing,
        line: 0,
        pen: 0.0,
        started: false,
    };
    let (placements, line_count) = breaker.run();

    // Raw line extents
    let mut widths = vec![0.0f32; line_count];
    let mut ends = vec![0.0f32; line_count];
    for (g, p) in glyphs.iter().zip(&placements) {
        if let Placement::Placed { line, x } = *p {
            ends[line] = ends[line].max(x + g.advance);
            if !is_space(g.ch) {
                widths[line] = widths[line].max(x + g.advance);
            }
        }
    }
    let block_width = widths.iter().copied().fold(0.0, f32::max);
    let offsets: Vec<f32> = widths.iter().map(|w| align_offset(opts, *w, block_width)).collect();

    // Group placed glyphs into lines and runs
    let mut lines: Vec<LayoutLine> = (0..line_count)
        .map(|i| LayoutLine {
            runs: Vec::new(),
            width: widths[i],
            y: i as f32 * pitch,
            source: 0..0,
            stops: Vec::new(),
        })
        .collect();
    let mut first_src: Vec<Option<usize>> = vec![None; line_count];

    for (g, p) in glyphs.iter().zip(&placements) {
        let end_src = g.src + g.ch.len_utf8();
        match *p {
            Placement::Placed { line, x } => {
                let x = x + offsets[line];
                let l = &mut lines[line];
                first_src[line].get_or_insert(g.src);
                l.source.end = end_src;
                l.stops.push((x, g.src));
                if let Some(run) = l.runs.last_mut().filter(|r| r.emphasized == g.emphasized) {
                    run.text.push(g.ch);
                    run.width = x + g.advance - run.x;
                } else {
                    l.runs.push(GlyphRun {
                        text: g.ch.to_string(),
                        x,
                        width: g.advance,
                        emphasized: g.emphasized,
                    });
                }
            }
            Placement::Break { line } => {
                first_src[line].get_or_insert(g.src);
                lines[line].source.end = g.src;
            }
            Placement::Collapsed => {}
        }
    }

    // Finish ranges and caret stops
    let mut next_start = 0;
    for (i, line) in lines.iter_mut().enumerate() {
        let start = first_src[i].unwrap_or(next_start);
        line.source.start = start;
        line.source.end = line.source.end.max(start);
        let end_x = ends[i] + offsets[i];
        line.stops.push((if line.stops.is_empty() { offsets[i] } else { end_x }, line.source.end));
        next_start = line.source.end;
    }
    // A trailing newline opens an empty last line starting after it
    if let (Some(last), Some(Placement::Break { .. })) = (lines.last_mut(), placements.last()) {
        if first_src[line_count - 1].is_none() {
            last.source = text.len()..text.len();
            last.stops = vec![(offsets[line_count - 1], text.len())];
        }
    }

    let caret = opts
        .caret
        .map(|c| resolve_caret(c, &glyphs, &placements, &ends, &offsets, pitch, line_count));

    let height = line_count as f32 * line_height + (line_count - 1) as f32 * opts.line_spacing;
    TextLayout {
        lines,
        size: Vec2::new(block_width, height),
        font_size: opts.font_size,
        letter_spacing: opts.letter_spacing,
        line_height,
        caret,
    }
}

fn align_offset(opts: &WrapOptions, line_width: f32, block_width: f32) -> f32 {
    let frame = if opts.max_width > 0.0 { opts.max_width } else { block_width };
    match opts.align {
        Align::Left => 0.0,
        Align::Center => ((frame - line_width) * 0.5).max(0.0),
        Align::Right => (frame - line_width).max(0.0),
    }
}

fn resolve_caret(
    caret: usize,
    glyphs: &[Glyph],
    placements: &[Placement],
    ends: &[f32],
    offsets: &[f32],
    pitch: f32,
    line_count: usize,
) -> CaretPos {
    let at = |line: usize, x: f32| CaretPos { line, x: x + offsets[line], y: line as f32 * pitch };

    // After the right edge of the nearest placed glyph before `k`, else start of `fallback_line`
    let after_prev = |k: usize, fallback_line: usize| {
        glyphs[..k]
            .iter()
            .zip(&placements[..k])
            .rev()
            .find_map(|(g, p)| match *p {
                Placement::Placed { line, x } => Some(at(line, x + g.advance)),
                Placement::Break { .. } => None,
                Placement::Collapsed => None,
            })
            .filter(|pos| pos.line == fallback_line || fallback_line == usize::MAX)
            .unwrap_or_else(|| at(fallback_line.min(line_count - 1), 0.0))
    };

    // First glyph at or after the caret byte (markers are skipped)
    let Some(k) = glyphs.iter().position(|g| g.src >= caret) else {
        return match placements.last() {
            Some(Placement::Break { .. }) => at(line_count - 1, 0.0),
            _ => {
                let line = line_count - 1;
                at(line, ends[line])
            }
        };
    };

    match placements[k] {
        Placement::Placed { line, x } => at(line, x),
        Placement::Break { line } => after_prev(k, line),
        Placement::Collapsed => after_prev(k, usize::MAX),
    }
}

/// Lay out text, shrinking the font until it fits `opts.max_height`
///
/// Steps down by `scale_step` and stops at `min_font_size` even if the text
/// still overflows.
pub fn layout_fit<F: FontMetrics + ?Sized>(font: &F, text: &str, opts: &WrapOptions) -> TextLayout {
    let Some(max_height) = opts.max_height else {
        return layout(font, text, opts);
    };
    let step = if opts.scale_step > 0.0 { opts.scale_step } else { 1.0 };
    let min = opts.min_font_size.min(opts.font_size);

    let mut sized = opts.clone();
    loop {
        let result = layout(font, text, &sized);
        if result.size.y <= max_height || sized.font_size <= min {
            return result;
        }
        sized.font_size = (sized.font_size - step).max(min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BitmapFont;

    /// 8px cells: at size 8 every glyph is 8px wide and lines are 8px tall
    fn font() -> BitmapFont {
        BitmapFont::metrics_only(8.0, 8.0)
    }

    fn lines(layout: &TextLayout) -> Vec<String> {
        layout.lines.iter().map(|l| l.text()).collect()
    }

    #[test]
    fn test_no_wrap_when_width_unbounded() {
        let l = layout(&font(), "hello world", &WrapOptions::new(0.0, 8.0));
        assert_eq!(lines(&l), ["hello world"]);
        assert!((l.size.x - 88.0).abs() < 0.001);
        assert!((l.size.y - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_greedy_wrap_collapses_space() {
        // 11 glyphs per 88px line
        let l = layout(&font(), "the quick brown fox jumps", &WrapOptions::new(88.0, 8.0));
        assert_eq!(lines(&l), ["the quick", "brown fox", "jumps"]);
        assert_eq!(l.lines[1].source, 10..19);
        assert!(l.lines.iter().all(|line| line.width <= 88.0));
    }

    #[test]
    fn test_word_exactly_fits() {
        let l = layout(&font(), "abcd efgh", &WrapOptions::new(72.0, 8.0));
        assert_eq!(lines(&l), ["abcd efgh"]);
    }

    #[test]
    fn test_hard_newlines_and_blank_line() {
        let l = layout(&font(), "ab\n\ncd", &WrapOptions::new(200.0, 8.0));
        assert_eq!(lines(&l), ["ab", "", "cd"]);
        assert!((l.lines[2].y - 16.0).abs() < 0.001);
        assert_eq!(l.lines[1].source, 3..3);
    }

    #[test]
    fn test_long_word_split_by_char() {
        let l = layout(&font(), "abcdefghij", &WrapOptions::new(32.0, 8.0));
        assert_eq!(lines(&l), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_leading_spaces_do_not_split_word() {
        let l = layout(&font(), "x\n   abcd", &WrapOptions::new(40.0, 8.0));
        assert_eq!(lines(&l), ["x", "abcd"]);
        assert_eq!(l.lines[1].source, 5..9);

        // Spaces that leave room are kept
        let l = layout(&font(), "x\n ab", &WrapOptions::new(40.0, 8.0));
        assert_eq!(lines(&l), ["x", " ab"]);
    }

    #[test]
    fn test_narrow_width_still_progresses() {
        let l = layout(&font(), "abc", &WrapOptions::new(1.0, 8.0));
        assert_eq!(lines(&l), ["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_spaces_not_counted() {
        let l = layout(&font(), "ab   ", &WrapOptions::new(0.0, 8.0));
        assert!((l.lines[0].width - 16.0).abs() < 0.001);
        assert!((l.size.x - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_letter_and_line_spacing() {
        let opts = WrapOptions::new(0.0, 8.0).spacing(2.0, 4.0);
        let l = layout(&font(), "ab\ncd", &opts);
        // 2 glyphs + 1 gap
        assert!((l.lines[0].width - 18.0).abs() < 0.001);
        assert!((l.size.y - 20.0).abs() < 0.001);
        assert!((l.lines[1].y - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_emphasis_runs() {
        let opts = WrapOptions::new(0.0, 8.0).emphasis('^');
        let l = layout(&font(), "press ^Enter^ now", &opts);
        let runs = &l.lines[0].runs;
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].text, "Enter");
        assert!(runs[1].emphasized);
        assert!((runs[1].x - 48.0).abs() < 0.001);
        assert_eq!(l.lines[0].text(), "press Enter now");
    }

    #[test]
    fn test_doubled_marker_is_literal() {
        let opts = WrapOptions::new(0.0, 8.0).emphasis('^');
        let l = layout(&font(), "2^^3", &opts);
        assert_eq!(lines(&l), ["2^3"]);
        assert!(l.lines[0].runs.iter().all(|r| !r.emphasized));
    }

    #[test]
    fn test_emphasis_survives_wrap() {
        let opts = WrapOptions::new(40.0, 8.0).emphasis('*');
        let l = layout(&font(), "*aaa bbb*", &opts);
        assert_eq!(lines(&l), ["aaa", "bbb"]);
        assert!(l.lines[1].runs[0].emphasized);
    }

    #[test]
    fn test_center_and_right_align() {
        let opts = WrapOptions::new(80.0, 8.0).align(Align::Center);
        let l = layout(&font(), "ab", &opts);
        assert!((l.lines[0].runs[0].x - 32.0).abs() < 0.001);

        let opts = WrapOptions::new(80.0, 8.0).align(Align::Right);
        let l = layout(&font(), "ab", &opts);
        assert!((l.lines[0].runs[0].x - 64.0).abs() < 0.001);
    }

    #[test]
    fn test_caret_positions() {
        let text = "the quick brown";
        let at = |c| {
            layout(&font(), text, &WrapOptions::new(88.0, 8.0).caret(Some(c)))
                .caret
                .unwrap()
        };
        assert_eq!(at(0), CaretPos { line: 0, x: 0.0, y: 0.0 });
        assert_eq!(at(4), CaretPos { line: 0, x: 32.0, y: 0.0 });
        // The space at byte 9 collapsed into the wrap: end of line 0
        assert_eq!(at(9), CaretPos { line: 0, x: 72.0, y: 0.0 });
        assert_eq!(at(10), CaretPos { line: 1, x: 0.0, y: 8.0 });
        // Past the end: after the last glyph
        assert_eq!(at(15), CaretPos { line: 1, x: 40.0, y: 8.0 });
    }

    #[test]
    fn test_caret_around_newlines() {
        let at = |text: &str, c| {
            layout(&font(), text, &WrapOptions::new(0.0, 8.0).caret(Some(c)))
                .caret
                .unwrap()
        };
        assert_eq!(at("ab\ncd", 2), CaretPos { line: 0, x: 16.0, y: 0.0 });
        assert_eq!(at("ab\n", 3), CaretPos { line: 1, x: 0.0, y: 8.0 });
        assert_eq!(at("\n\n", 1), CaretPos { line: 1, x: 0.0, y: 8.0 });
        assert_eq!(at("", 0), CaretPos { line: 0, x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_caret_skips_markers() {
        let opts = WrapOptions::new(0.0, 8.0).emphasis('^').caret(Some(1));
        // Byte 1 is inside "^ab^" right after the marker: before 'a'
        let l = layout(&font(), "^ab^", &opts);
        assert_eq!(l.caret.unwrap().x, 0.0);
    }

    #[test]
    fn test_hit_test() {
        let l = layout(&font(), "the quick brown", &WrapOptions::new(88.0, 8.0));
        assert_eq!(l.hit_test(0.0, 0.0), 0);
        assert_eq!(l.hit_test(13.0, 2.0), 2);
        assert_eq!(l.hit_test(500.0, 2.0), 9);
        assert_eq!(l.hit_test(9.0, 12.0), 11);
        assert_eq!(l.hit_test(500.0, 500.0), 15);
    }

    #[test]
    fn test_fit_shrinks_to_height() {
        let text = "one two three four five six";
        let opts = WrapOptions::new(100.0, 16.0).fit(32.0, 4.0);
        let l = layout_fit(&font(), text, &opts);
        assert!(l.size.y <= 32.0);
        assert!(l.font_size < 16.0 && l.font_size >= 4.0);

        // Larger size one step up would not have fit
        let bigger = layout(&font(), text, &WrapOptions::new(100.0, l.font_size + 1.0));
        assert!(bigger.size.y > 32.0);
    }

    #[test]
    fn test_fit_stops_at_min_size() {
        let text = "a b c d e f g h i j k l m n o p";
        let opts = WrapOptions::new(8.0, 16.0).fit(10.0, 12.0);
        let l = layout_fit(&font(), text, &opts);
        assert_eq!(l.font_size, 12.0);
        assert!(l.size.y > 10.0);
    }

    #[test]
    fn test_fit_keeps_size_when_it_fits() {
        let opts = WrapOptions::new(0.0, 16.0).fit(100.0, 8.0);
        assert_eq!(layout_fit(&font(), "hi", &opts).font_size, 16.0);
    }
}
