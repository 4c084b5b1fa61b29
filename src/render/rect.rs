//! Rectangle type for layout and hit testing

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Check if point is inside (right/bottom edges exclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping area of two rects, `None` if they don't overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Same size, moved by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        self.pad_sides(padding, padding, padding, padding)
    }

    /// Shrink by different padding on each side
    pub fn pad_sides(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            (self.w - left - right).max(0.0),
            (self.h - top - bottom).max(0.0),
        )
    }

    /// Split horizontally at ratio (0.0 - 1.0), returns (left, right)
    pub fn split_h(&self, ratio: f32) -> (Self, Self) {
        self.split_h_px(self.w * ratio.clamp(0.0, 1.0))
    }

    /// Split vertically at ratio (0.0 - 1.0), returns (top, bottom)
    pub fn split_v(&self, ratio: f32) -> (Self, Self) {
        self.split_v_px(self.h * ratio.clamp(0.0, 1.0))
    }

    /// Split horizontally at fixed pixel position from left
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Split vertically at fixed pixel position from top
    pub fn split_v_px(&self, pixels: f32) -> (Self, Self) {
        let split_y = pixels.clamp(0.0, self.h);
        (
            Self::new(self.x, self.y, self.w, split_y),
            Self::new(self.x, self.y + split_y, self.w, self.h - split_y),
        )
    }

    /// Horizontal slice from the top (title bars, toolbars)
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }

    /// Remaining area after slicing top
    pub fn remaining_after_top(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Vertical slice from the right (scrollbars)
    pub fn slice_right(&self, width: f32) -> Self {
        let w = width.min(self.w);
        Self::new(self.right() - w, self.y, w, self.h)
    }
}

impl From<macroquad::math::Rect> for Rect {
    fn from(r: macroquad::math::Rect) -> Self {
        Self::new(r.x, r.y, r.w, r.h)
    }
}

impl From<Rect> for macroquad::math::Rect {
    fn from(r: Rect) -> Self {
        macroquad::math::Rect::new(r.x, r.y, r.w, r.h)
    }
}
