//! Engine configuration (RON on disk)

use macroquad::window::Conf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::serialize::{self, SerializeError};

/// Window, text and file settings
///
/// Missing fields fall back to defaults, so old config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
    pub high_dpi: bool,
    pub fullscreen: bool,
    /// Frame cap; 0 runs uncapped (vsync)
    pub target_fps: u32,
    pub font_size: f32,
    /// Name of the palette selected at startup
    pub palette: String,
    /// Extra palettes to load (RON or JSON)
    pub palette_file: Option<PathBuf>,
    /// Saved input bindings
    pub bindings_file: Option<PathBuf>,
    /// `error`, `warn`, `info`, `debug` or `trace`; `RUST_LOG` overrides
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "quadkit".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            high_dpi: true,
            fullscreen: false,
            target_fps: 0,
            font_size: 16.0,
            palette: "dark".to_string(),
            palette_file: None,
            bindings_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from disk; a missing file gives the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SerializeError> {
        let path = path.as_ref();
        match serialize::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(SerializeError::NotFound(_)) => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        serialize::save(path.as_ref(), self)?;
        log::info!("saved config to {}", path.as_ref().display());
        Ok(())
    }

    /// Seconds per frame for the frame cap, if any
    pub fn frame_time(&self) -> Option<f64> {
        (self.target_fps > 0).then(|| 1.0 / self.target_fps as f64)
    }

    /// Window settings for `macroquad::Window::from_config`
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            window_resizable: self.resizable,
            high_dpi: self.high_dpi,
            // WASM: browser handles sizing
            #[cfg(not(target_arch = "wasm32"))]
            fullscreen: self.fullscreen,
            ..Default::default()
        }
    }
}

/// Per-user config directory for `app` (e.g. `~/.config/<app>`)
#[cfg(not(target_arch = "wasm32"))]
pub fn user_config_dir(app: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(app))
}

#[cfg(target_arch = "wasm32")]
pub fn user_config_dir(_app: &str) -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::load(dir.path().join("engine.ron")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_save_load_and_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.ron");
        let config = EngineConfig { title: "demo".into(), target_fps: 60, ..Default::default() };
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap(), config);

        std::fs::write(&path, "(width: 640)").unwrap();
        let partial = EngineConfig::load(&path).unwrap();
        assert_eq!(partial.width, 640);
        assert_eq!(partial.title, "quadkit");
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.ron");
        std::fs::write(&path, "(width: ").unwrap();
        assert!(EngineConfig::load(&path).is_err());
    }

    #[test]
    fn test_window_conf_and_frame_time() {
        let config = EngineConfig { width: 0, target_fps: 50, ..Default::default() };
        let conf = config.window_conf();
        assert_eq!(conf.window_width, 1);
        assert_eq!(conf.window_title, "quadkit");
        assert!((config.frame_time().unwrap() - 0.02).abs() < 0.001);
        assert!(EngineConfig::default().frame_time().is_none());
    }
}
