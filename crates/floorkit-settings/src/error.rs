//! Settings errors.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A value failed validation. `key` is the dotted path, e.g. `walls.height`.
    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Cannot read or write the config file: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems locating or naming the config file
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Only `.json` and `.toml` are understood.
    #[error("Unsupported config format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("No config directory on {0}")]
    NoConfigDirectory(String),
}

impl SettingsError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            key,
            reason: reason.into(),
        }
    }

    /// Dotted key of the offending value, for validation failures
    pub fn key(&self) -> Option<&'static str> {
        match self {
            SettingsError::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
