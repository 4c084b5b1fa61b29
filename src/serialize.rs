//! Serialization adapters
//!
//! Thin wrappers around serde so game code can save and load settings,
//! palettes and bindings without caring which format sits on disk:
//! - `.ron` → RON (human-editable, default for config)
//! - `.json` → JSON (interop with external tools)

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// On-disk serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
}

impl Format {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SerializeError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "ron" => Ok(Format::Ron),
            _ => Err(SerializeError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Ron => "RON",
        }
    }
}

/// Serialization error types
#[derive(Debug, Clone, PartialEq)]
pub enum SerializeError {
    /// File not found
    NotFound(String),
    /// Any other I/O failure
    Io(String),
    /// Encoding or decoding failed
    Parse { format: Format, message: String },
    /// Extension doesn't map to a known format
    UnknownFormat(String),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::NotFound(path) => write!(f, "not found: {}", path),
            SerializeError::Io(msg) => write!(f, "I/O error: {}", msg),
            SerializeError::Parse { format, message } => {
                write!(f, "{} error: {}", format.name(), message)
            }
            SerializeError::UnknownFormat(path) => {
                write!(f, "unknown serialization format for {}", path)
            }
        }
    }
}

impl std::error::Error for SerializeError {}

impl From<std::io::Error> for SerializeError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => SerializeError::NotFound(e.to_string()),
            _ => SerializeError::Io(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(e: serde_json::Error) -> Self {
        SerializeError::Parse { format: Format::Json, message: e.to_string() }
    }
}

impl From<ron::Error> for SerializeError {
    fn from(e: ron::Error) -> Self {
        SerializeError::Parse { format: Format::Ron, message: e.to_string() }
    }
}

impl From<ron::error::SpannedError> for SerializeError {
    fn from(e: ron::error::SpannedError) -> Self {
        SerializeError::Parse { format: Format::Ron, message: e.to_string() }
    }
}

/// Serialize a value to a pretty-printed string
pub fn to_string<T: Serialize>(value: &T, format: Format) -> Result<String, SerializeError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Ron => {
            let config = ron::ser::PrettyConfig::new().depth_limit(4);
            Ok(ron::ser::to_string_pretty(value, config)?)
        }
    }
}

/// Parse a value from a string
pub fn from_str<T: DeserializeOwned>(s: &str, format: Format) -> Result<T, SerializeError> {
    match format {
        Format::Json => Ok(serde_json::from_str(s)?),
        Format::Ron => Ok(ron::from_str(s)?),
    }
}

/// Write a value to disk, creating parent directories as needed
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), SerializeError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = to_string(value, format)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    log::debug!("saved {} ({})", path.display(), format.name());
    Ok(())
}

/// Read a value from disk
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SerializeError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let value = from_str(&text, format)?;
    log::debug!("loaded {} ({})", path.display(), format.name());
    Ok(value)
}

/// Read a value from disk, falling back to `T::default()` if the file is missing
///
/// Parse errors still propagate: a corrupt file should not silently reset settings.
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> Result<T, SerializeError> {
    match load(path.as_ref()) {
        Ok(value) => Ok(value),
        Err(SerializeError::NotFound(_)) => {
            log::info!("{} not found, using defaults", path.as_ref().display());
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}
