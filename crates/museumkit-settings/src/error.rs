//! Failures while reading, writing or checking an `EditorConfig`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A value is out of range or contradicts another one
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No per-user configuration directory on this platform
    #[error("No configuration directory: {0}")]
    ConfigDirectory(String),

    #[error("Cannot access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("Cannot write TOML config: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Problems with the config file itself rather than its values
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` are understood
    #[error("Unsupported config format '{0}' (expected json or toml)")]
    UnsupportedFormat(String),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
