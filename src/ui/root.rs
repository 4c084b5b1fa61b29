//! Owner of a widget tree and its context

use std::any::Any;
use crate::render::Rect;
use super::widget::{apply_theme, find, find_mut, UiEvent, Widget, WidgetId};
use super::{KeyboardState, MouseState, UiContext, UiTheme};

pub struct UiRoot {
    root: Box<dyn Widget>,
    ctx: UiContext,
}

impl UiRoot {
    pub fn new(root: impl Widget + 'static) -> Self {
        Self { root: Box::new(root), ctx: UiContext::new() }
    }

    /// Lay out into `screen`, then run input; returns this frame's events
    pub fn frame(&mut self, screen: Rect, mouse: MouseState, keyboard: KeyboardState, dt: f32) -> Vec<UiEvent> {
        self.ctx.begin_frame(mouse, keyboard, dt);
        self.root.layout(screen);
        self.root.update(&mut self.ctx);
        self.ctx.take_events()
    }

    /// `frame` with live macroquad input, filling the whole window
    pub fn frame_macroquad(&mut self) -> Vec<UiEvent> {
        let screen = Rect::screen(macroquad::window::screen_width(), macroquad::window::screen_height());
        let dt = macroquad::time::get_frame_time();
        self.frame(screen, MouseState::from_macroquad(), KeyboardState::from_macroquad(), dt)
    }

    pub fn draw(&self, theme: &UiTheme) {
        self.root.draw(theme);
    }

    /// Push theme metrics down the tree; takes effect at the next `frame`
    pub fn apply_theme(&mut self, theme: &UiTheme) {
        apply_theme(self.root.as_mut(), theme);
    }

    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.ctx.focused
    }

    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        self.ctx.set_focus(id);
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        find(self.root.as_ref(), id)
    }

    /// Look up a widget by id and downcast it
    pub fn find<T: Any>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.as_any().downcast_ref()
    }

    pub fn find_mut<T: Any>(&mut self, id: WidgetId) -> Option<&mut T> {
        find_mut(self.root.as_mut(), id)?.as_any_mut().downcast_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BitmapFont;
    use crate::ui::{Button, Container, Label, ScrollView, Spacer, TextInput};
    use std::rc::Rc;

    const SUBMIT: WidgetId = WidgetId(1);
    const NAME: WidgetId = WidgetId(2);
    const LOG: WidgetId = WidgetId(3);

    fn ui() -> UiRoot {
        let font: Rc<BitmapFont> = Rc::new(BitmapFont::metrics_only(8.0, 8.0));
        let body = Container::vertical()
            .spacing(0.0)
            .child(TextInput::new(NAME, font.clone(), 8.0).with_text("abc"))
            .child(Button::new(SUBMIT, "Submit", font.clone(), 8.0))
            .child(ScrollView::new(LOG, Label::new("*log*", font, 8.0)));
        UiRoot::new(body)
    }

    #[test]
    fn test_find_mut_downcasts() {
        let mut root = ui();
        root.find_mut::<TextInput>(NAME).unwrap().set_text("xyz");
        assert_eq!(root.find::<TextInput>(NAME).unwrap().text(), "xyz");
        assert!(root.find::<Button>(NAME).is_none());
        assert!(root.find::<ScrollView>(LOG).is_some());
        assert!(root.widget(WidgetId(99)).is_none());
    }

    #[test]
    fn test_apply_theme_reaches_nested_widgets() {
        let inner = Container::vertical().with_id(WidgetId(5)).child(Spacer::new(10.0, 10.0)).child(Spacer::new(10.0, 10.0));
        let mut root = UiRoot::new(Container::vertical().spacing(0.0).child(Spacer::new(10.0, 10.0)).child(inner));
        root.apply_theme(&UiTheme { spacing: 10.0, ..UiTheme::default() });
        root.frame(Rect::new(0.0, 0.0, 100.0, 100.0), MouseState::default(), KeyboardState::default(), 0.016);

        // Outer spacing was set explicitly, the nested container takes the theme's
        let nested = root.widget(WidgetId(5)).unwrap();
        assert!((nested.rect().y - 10.0).abs() < 0.001);
        assert!((nested.children()[1].rect().y - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_frame_click_and_type() {
        let mut root = ui();
        let screen = Rect::new(0.0, 0.0, 200.0, 200.0);
        // Layout: input 0..20, button 20..40
        let press = MouseState { x: 50.0, y: 30.0, left_pressed: true, left_down: true, ..Default::default() };
        assert!(root.frame(screen, press, KeyboardState::default(), 0.016).is_empty());
        let release = MouseState { x: 50.0, y: 30.0, left_released: true, ..Default::default() };
        let events = root.frame(screen, release, KeyboardState::default(), 0.016);
        assert_eq!(events, vec![UiEvent::Clicked(SUBMIT)]);

        let click_input = MouseState { x: 50.0, y: 10.0, left_pressed: true, left_down: true, ..Default::default() };
        let events = root.frame(screen, click_input, KeyboardState::default(), 0.016);
        assert_eq!(events, vec![UiEvent::FocusChanged(Some(NAME))]);
        assert_eq!(root.focused(), Some(NAME));

        let typed = KeyboardState { chars: vec!['!'], ..Default::default() };
        let events = root.frame(screen, MouseState::default(), typed, 0.016);
        assert_eq!(events, vec![UiEvent::TextChanged(NAME)]);
        assert_eq!(root.find::<TextInput>(NAME).unwrap().text(), "abc!");
    }
}
