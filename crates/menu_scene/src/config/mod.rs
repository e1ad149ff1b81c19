//! File-backed settings
//!
//! Settings are read once at startup and shared read-only afterwards. The
//! on-disk encoding follows the file extension: `.toml` or `.ron`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

mod interface;

pub use interface::InterfaceSettings;

/// On-disk encoding of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl ConfigFormat {
    /// Encoding implied by the extension of `path`
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::new())
                .map_err(|e| e.to_string()),
        }
    }
}

/// Settings that can be stored in a file
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Read settings from `path`
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = format.decode(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        log::debug!("Loaded {:?} settings from {}", format, path.display());
        Ok(settings)
    }

    /// Read settings from `path`, using defaults if it cannot be loaded
    fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load_from_file(&path).unwrap_or_else(|error| {
            log::warn!("{}; using default settings", error);
            Self::default()
        })
    }

    /// Write settings to `path`, replacing any existing file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = ConfigFormat::from_path(path)?
            .encode(self)
            .map_err(ConfigError::Serialize)?;

        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors loading or saving settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read or written
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// File accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Settings file content is malformed
    #[error("cannot parse {}: {message}", .path.display())]
    Parse {
        /// File parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Settings could not be encoded
    #[error("cannot encode settings: {0}")]
    Serialize(String),

    /// Extension is neither `.toml` nor `.ron`
    #[error("unsupported settings format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
