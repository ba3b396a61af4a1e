//! Settings errors
//!
//! A manufacturing config either loads and validates completely or the
//! caller gets one of these; formulas never see a half-valid config.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A constant is out of range (non-positive thickness, inverted bounds)
    #[error("{key} rejected: {reason}")]
    InvalidSetting { key: String, reason: String },

    /// File extension other than `.json` or `.toml`
    #[error("cannot read config with extension '{0}'")]
    UnsupportedFormat(String),

    #[error("no config directory: {0}")]
    ConfigDirectory(String),

    #[error("config file: {0}")]
    IoError(#[from] io::Error),

    #[error("config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("config TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("config TOML output: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

impl SettingsError {
    /// Out-of-range value for `key` (dotted section path)
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The offending dotted key, for validation failures
    pub fn key(&self) -> Option<&str> {
        match self {
            SettingsError::InvalidSetting { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
