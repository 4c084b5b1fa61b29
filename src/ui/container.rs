//! Stack layout

use macroquad::prelude::*;
use std::any::Any;
use crate::render::Rect;
use super::widget::{Widget, WidgetId};
use super::{UiContext, UiTheme};

/// Main axis of a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Vertical,   // Top / Bottom
    Horizontal, // Left | Right
}

/// Placement of children across the main axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CrossAlign {
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

/// Stacks children along one axis at their measured size
pub struct Container {
    id: WidgetId,
    dir: Direction,
    align: CrossAlign,
    padding: f32,
    spacing: f32,
    /// Spacing set through the builder; otherwise the theme's
    custom_spacing: Option<f32>,
    children: Vec<Box<dyn Widget>>,
    rect: Rect,
}

impl Container {
    pub fn new(dir: Direction) -> Self {
        Self {
            id: WidgetId::auto(),
            dir,
            align: CrossAlign::Stretch,
            padding: 0.0,
            spacing: UiTheme::default().spacing,
            custom_spacing: None,
            children: Vec::new(),
            rect: Rect::default(),
        }
    }

    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    pub fn with_id(mut self, id: WidgetId) -> Self {
        self.id = id;
        self
    }

    pub fn align(mut self, align: CrossAlign) -> Self {
        self.align = align;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self.custom_spacing = Some(spacing);
        self
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn push(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn gaps(&self) -> f32 {
        self.spacing * self.children.len().saturating_sub(1) as f32
    }

    /// Offset and extent on the cross axis for a child of `size` in `avail`
    fn cross(&self, size: f32, avail: f32) -> (f32, f32) {
        match self.align {
            CrossAlign::Stretch => (0.0, avail),
            CrossAlign::Start => (0.0, size.min(avail)),
            CrossAlign::Center => (((avail - size) * 0.5).max(0.0), size.min(avail)),
            CrossAlign::End => ((avail - size).max(0.0), size.min(avail)),
        }
    }
}

impl Widget for Container {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn measure(&self, max_width: f32) -> Vec2 {
        let inner_w = (max_width - self.padding * 2.0).max(0.0);
        let sizes = self.children.iter().map(|c| c.measure(inner_w));
        let content = match self.dir {
            Direction::Vertical => sizes.fold(Vec2::ZERO, |acc, s| vec2(acc.x.max(s.x), acc.y + s.y)),
            Direction::Horizontal => sizes.fold(Vec2::ZERO, |acc, s| vec2(acc.x + s.x, acc.y.max(s.y))),
        };
        let gaps = match self.dir {
            Direction::Vertical => vec2(0.0, self.gaps()),
            Direction::Horizontal => vec2(self.gaps(), 0.0),
        };
        content + gaps + Vec2::splat(self.padding * 2.0)
    }

    fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        let inner = rect.pad(self.padding);
        let mut pen = 0.0;
        for i in 0..self.children.len() {
            let child_rect = match self.dir {
                Direction::Vertical => {
                    let size = self.children[i].measure(inner.w);
                    let (off, w) = self.cross(size.x, inner.w);
                    Rect::new(inner.x + off, inner.y + pen, w, size.y)
                }
                Direction::Horizontal => {
                    let size = self.children[i].measure((inner.w - pen).max(0.0));
                    let (off, h) = self.cross(size.y, inner.h);
                    Rect::new(inner.x + pen, inner.y + off, size.x, h)
                }
            };
            pen += match self.dir {
                Direction::Vertical => child_rect.h,
                Direction::Horizontal => child_rect.w,
            } + self.spacing;
            self.children[i].layout(child_rect);
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, ctx: &mut UiContext) {
        for child in &mut self.children {
            child.update(ctx);
        }
    }

    fn draw(&self, theme: &UiTheme) {
        for child in &self.children {
            child.draw(theme);
        }
    }

    fn apply_theme(&mut self, theme: &UiTheme) {
        self.spacing = self.custom_spacing.unwrap_or(theme.spacing);
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Spacer;

    fn rects(c: &Container) -> Vec<Rect> {
        c.children().iter().map(|w| w.rect()).collect()
    }

    #[test]
    fn test_vertical_stack_stretch() {
        let mut c = Container::vertical()
            .padding(5.0)
            .spacing(2.0)
            .child(Spacer::new(20.0, 10.0))
            .child(Spacer::new(40.0, 15.0));
        let size = c.measure(100.0);
        assert!((size.x - 50.0).abs() < 0.001);
        assert!((size.y - 37.0).abs() < 0.001);

        c.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects(&c), vec![Rect::new(5.0, 5.0, 90.0, 10.0), Rect::new(5.0, 17.0, 90.0, 15.0)]);
    }

    #[test]
    fn test_cross_alignment() {
        let mut c = Container::vertical().spacing(0.0).align(CrossAlign::Center).child(Spacer::new(20.0, 10.0));
        c.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects(&c)[0], Rect::new(40.0, 0.0, 20.0, 10.0));

        let mut c = Container::vertical().align(CrossAlign::End).child(Spacer::new(20.0, 10.0));
        c.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects(&c)[0], Rect::new(80.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_horizontal_stack() {
        let mut c = Container::horizontal()
            .spacing(4.0)
            .align(CrossAlign::Start)
            .child(Spacer::new(20.0, 10.0))
            .child(Spacer::new(30.0, 25.0));
        let size = c.measure(200.0);
        assert!((size.x - 54.0).abs() < 0.001);
        assert!((size.y - 25.0).abs() < 0.001);

        c.layout(Rect::new(0.0, 0.0, 200.0, 40.0));
        assert_eq!(rects(&c), vec![Rect::new(0.0, 0.0, 20.0, 10.0), Rect::new(24.0, 0.0, 30.0, 25.0)]);
    }

    #[test]
    fn test_theme_spacing_unless_set() {
        let theme = UiTheme { spacing: 10.0, ..UiTheme::default() };
        let mut themed = Container::vertical().child(Spacer::new(10.0, 10.0)).child(Spacer::new(10.0, 10.0));
        let mut fixed = Container::vertical().spacing(2.0).child(Spacer::new(10.0, 10.0)).child(Spacer::new(10.0, 10.0));
        themed.apply_theme(&theme);
        fixed.apply_theme(&theme);
        assert!((themed.measure(100.0).y - 30.0).abs() < 0.001);
        assert!((fixed.measure(100.0).y - 22.0).abs() < 0.001);
    }
}
