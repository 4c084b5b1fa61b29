//! quadkit demo: wrapped text, a scroll view, text input, action mapping,
//! palette switching and pooled particles

use macroquad::prelude::*;
use quadkit::config::{self, EngineConfig};
use quadkit::input::{action, Binding, InputHandler, InputSource, MacroquadInput};
use quadkit::logging;
use quadkit::palette;
use quadkit::pool::{Pool, Poolable};
use quadkit::render::{progress_bar, Rect};
use quadkit::rng::Rng;
use quadkit::serialize::SerializeError;
use quadkit::text::{Align, TextFont};
use quadkit::ui::{
    Button, Container, CrossAlign, FontRef, KeyboardState, Label, MouseState, Panel, ScrollView, TextInput, UiEvent,
    UiRoot, UiTheme, WidgetId,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const APP: &str = "quadkit";

const LOG: WidgetId = WidgetId(1);
const LOG_LIST: WidgetId = WidgetId(2);
const INPUT: WidgetId = WidgetId(3);
const NEXT_PALETTE: WidgetId = WidgetId(4);
const BURST: WidgetId = WidgetId(5);
const REBIND: WidgetId = WidgetId(6);

const INTRO: &str = "Text between *asterisks* is emphasized. Lines wrap greedily \
    at spaces; words too long for a line are split. Resize the window to watch \
    it reflow.";

const PARAGRAPHS: [&str; 4] = [
    "Move the *dot* with WASD, the arrow keys or a gamepad stick.",
    "Press *Space* or the south face button for a burst of particles. \
     Particles come from a pool, so bursts reuse old objects.",
    "Press *E* or the right bumper to cycle palettes. Every widget restyles.",
    "Type below and press *Enter* to add a line here. The view scrolls to show it.",
];

#[derive(Default)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    color: Color,
}

impl Poolable for Particle {
    fn reset(&mut self) {
        *self = Particle::default();
    }
}

fn config_path() -> PathBuf {
    config::user_config_dir(APP)
        .map(|dir| dir.join("engine.ron"))
        .unwrap_or_else(|| PathBuf::from("engine.ron"))
}

fn build_ui(font: &FontRef, font_size: f32) -> UiRoot {
    let mut log = Container::vertical().with_id(LOG_LIST).spacing(6.0);
    for text in PARAGRAPHS {
        log.push(Box::new(Label::new(text, font.clone(), font_size)));
    }

    let buttons = Container::horizontal()
        .spacing(6.0)
        .align(CrossAlign::Start)
        .child(Button::new(NEXT_PALETTE, "Next palette", font.clone(), font_size))
        .child(Button::new(BURST, "Burst", font.clone(), font_size))
        .child(Button::new(REBIND, "Rebind burst", font.clone(), font_size));

    let body = Container::vertical()
        .spacing(8.0)
        .child(Label::new(INTRO, font.clone(), font_size).align(Align::Left))
        .child(ScrollView::new(LOG, log).max_height(font_size * 12.0))
        .child(
            TextInput::new(INPUT, font.clone(), font_size)
                .placeholder("Type and press Enter")
                .max_len(200),
        )
        .child(buttons)
        .child(Label::new(format!("quadkit v{}", quadkit::VERSION), font.clone(), font_size * 0.75).dim().align(Align::Right));

    UiRoot::new(Panel::new(body).title("quadkit demo", font.clone()))
}

fn burst(particles: &mut Pool<Particle>, rng: &mut Rng, at: Vec2) {
    for _ in 0..rng.range_i32(24, 48) {
        let Some(handle) = particles.acquire() else { break };
        if let Some(p) = particles.get_mut(handle) {
            p.pos = at;
            p.vel = rng.unit_vec2() * rng.range_f32(40.0, 180.0);
            p.life = rng.range_f32(0.4, 1.4);
            p.color = rng.color(1.0);
        }
    }
}

fn load_bindings(input: &mut InputHandler, path: &Path) {
    match input.load_bindings(path) {
        Ok(()) => {}
        Err(SerializeError::NotFound(_)) => log::info!("no saved bindings at {}", path.display()),
        Err(e) => log::warn!("ignoring bindings file: {}", e),
    }
}

async fn run(config: EngineConfig) {
    let font: FontRef = Rc::new(TextFont::builtin());

    palette::with_global(|palettes| {
        if let Some(path) = &config.palette_file {
            if let Err(e) = palettes.load_file(path) {
                log::warn!("could not load palettes: {}", e);
            }
        }
        if let Err(e) = palettes.set_current(&config.palette) {
            log::warn!("{}", e);
        }
    });
    let header_size = config.font_size * 1.25;
    let mut theme = palette::with_global(|p| UiTheme::from_palette(p.current())).with_header_size(header_size);

    let mut input = InputHandler::with_defaults();
    if let Some(path) = &config.bindings_file {
        load_bindings(&mut input, path);
    }
    let mut source = MacroquadInput::new();

    let mut ui = build_ui(&font, config.font_size);
    ui.apply_theme(&theme);
    let mut rng = Rng::from_time();
    let mut particles = Pool::with_capacity(Particle::default, 256).with_max_size(1024);
    let mut player = vec2(screen_width() * 0.75, screen_height() * 0.5);
    let mut capturing = false;

    log::info!("demo started (seed {})", rng.seed());

    loop {
        let frame_start = get_time();
        let dt = get_frame_time();

        source.poll();
        input.update(&source);

        let panel_w = (screen_width() * 0.45).clamp(280.0, 520.0);
        let (panel, _) = Rect::screen(screen_width(), screen_height()).pad(16.0).split_h_px(panel_w);
        let events = ui.frame(panel, MouseState::from_macroquad(), KeyboardState::from_macroquad(), dt);

        // +1 next palette, -1 previous
        let mut palette_step = 0;
        for event in events {
            match event {
                UiEvent::Clicked(NEXT_PALETTE) => palette_step = 1,
                UiEvent::Clicked(BURST) => burst(&mut particles, &mut rng, player),
                UiEvent::Clicked(REBIND) => {
                    capturing = true;
                    if let Some(button) = ui.find_mut::<Button>(REBIND) {
                        button.set_label("Press any key...");
                    }
                }
                UiEvent::TextSubmitted(INPUT) => {
                    let text = ui.find::<TextInput>(INPUT).map(|t| t.text().trim().to_string()).unwrap_or_default();
                    if !text.is_empty() {
                        if let Some(list) = ui.find_mut::<Container>(LOG_LIST) {
                            list.push(Box::new(Label::new(text, font.clone(), config.font_size)));
                        }
                        if let Some(view) = ui.find_mut::<ScrollView>(LOG) {
                            view.scroll_to_end();
                        }
                    }
                    if let Some(field) = ui.find_mut::<TextInput>(INPUT) {
                        field.set_text("");
                    }
                }
                other => log::trace!("ui event {:?}", other),
            }
        }

        // Rebinding grabs the next raw press (skipping the click that started it)
        if capturing {
            if let Some(binding) = input.capture_binding().filter(|b| !matches!(b, Binding::Mouse(_))) {
                input.rebind(action::CONFIRM, [binding]);
                log::info!("burst bound to {}", binding);
                capturing = false;
                if let Some(button) = ui.find_mut::<Button>(REBIND) {
                    button.set_label(format!("Burst: {}", binding.label(source.controller_type())));
                }
                if let Some(path) = &config.bindings_file {
                    if let Err(e) = input.save_bindings(path) {
                        log::warn!("could not save bindings: {}", e);
                    }
                }
            }
        } else if ui.focused().is_none() {
            // Actions only drive the game while no widget has the keyboard
            player += input.vector(action::MOVE_LEFT, action::MOVE_RIGHT, action::MOVE_UP, action::MOVE_DOWN) * 220.0 * dt;
            player = player.clamp(Vec2::ZERO, vec2(screen_width(), screen_height()));
            if input.pressed(action::CONFIRM) {
                burst(&mut particles, &mut rng, player);
            }
            if input.pressed(action::NEXT_TAB) {
                palette_step = 1;
            } else if input.pressed(action::PREV_TAB) {
                palette_step = -1;
            }
        }

        if palette_step != 0 {
            theme = palette::with_global(|p| {
                let current = if palette_step > 0 { p.next() } else { p.prev() };
                UiTheme::from_palette(current)
            })
            .with_header_size(header_size);
        }

        particles.retain(|p| {
            p.life -= dt;
            p.vel *= 1.0 - 1.5 * dt;
            p.pos += p.vel * dt;
            p.life > 0.0
        });

        clear_background(theme.background);
        for (_, p) in particles.iter() {
            let mut color = p.color;
            color.a = p.life.min(1.0);
            draw_circle(p.pos.x, p.pos.y, 3.0, color);
        }
        draw_circle(player.x, player.y, 8.0, theme.accent);

        ui.draw(&theme);

        let usage = particles.active_count() as f32 / particles.capacity().max(1) as f32;
        let bar = Rect::new(screen_width() - 216.0, screen_height() - 28.0, 200.0, 12.0);
        progress_bar(bar, usage, theme.panel, theme.accent);

        if let Some(frame_time) = config.frame_time() {
            let spare = frame_time - (get_time() - frame_start);
            #[cfg(not(target_arch = "wasm32"))]
            if spare > 0.0 {
                std::thread::sleep(std::time::Duration::from_secs_f64(spare));
            }
            #[cfg(target_arch = "wasm32")]
            let _ = spare;
        }

        next_frame().await;
    }
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let path = config_path();
    let loaded = EngineConfig::load(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        log::error!("bad config {}: {} (using defaults)", path.display(), e);
    }

    macroquad::Window::from_config(config.window_conf(), run(config));
}
