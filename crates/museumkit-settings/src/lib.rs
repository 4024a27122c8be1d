//! MuseumKit Settings Crate
//!
//! Handles editor configuration: grid and snapping parameters, placement
//! constraints, history limits and view bounds, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, Constraints, EditorConfig, GridSettings, HistorySettings, ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
