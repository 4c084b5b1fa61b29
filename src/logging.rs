//! Logger setup

use log::LevelFilter;

/// Parse a level name, falling back to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install env_logger at `level`; `RUST_LOG` takes precedence
///
/// Calling it twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(parse_level(level)).parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

/// Browser console logging comes from macroquad; nothing to install
#[cfg(target_arch = "wasm32")]
pub fn init(_level: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice() {
        init("info");
        init("debug");
    }
}
