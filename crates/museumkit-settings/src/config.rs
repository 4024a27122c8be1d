//! Editor configuration for MuseumKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Grid and snapping parameters
//! - Placement constraints used by the validator
//! - History limits
//! - View (zoom) bounds
//!
//! Plan coordinates are in grid units. Constraints that describe physical
//! sizes are in meters and are compared after converting through
//! `grid.grid_to_meters`.

use museumkit_core::units::{DEFAULT_GRID_TO_METERS, DEFAULT_MEASUREMENT_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Grid and snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid cell size in plan units
    pub grid_size: f64,
    /// Screen pixels per plan unit at zoom 1.0
    pub pixels_per_unit: f64,
    /// Meters represented by one plan unit
    pub grid_to_meters: f64,
    /// Maximum distance for snapping onto segments
    pub snap_threshold: f64,
    /// Maximum distance for snapping onto existing vertices
    pub vertex_snap_threshold: f64,
    /// Decimal places in reported measurements
    pub measurement_precision: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            pixels_per_unit: 40.0,
            grid_to_meters: DEFAULT_GRID_TO_METERS,
            snap_threshold: 0.8,
            vertex_snap_threshold: 0.3,
            measurement_precision: DEFAULT_MEASUREMENT_PRECISION,
        }
    }
}

/// Placement constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Minimum room area in square meters
    pub min_room_area: f64,
    /// Maximum room area in square meters
    pub max_room_area: f64,
    /// Vertices closer than this (plan units) count as duplicates
    pub duplicate_point_tolerance: f64,
    /// Allowed interpenetration between rooms (plan units)
    pub room_overlap_tolerance: f64,
    /// Minimum wall length in plan units
    pub min_wall_length: f64,
    /// Wall thickness bounds in meters
    pub min_wall_thickness: f64,
    pub max_wall_thickness: f64,
    /// Maximum distance (plan units) between a door and its wall line
    pub door_snap_tolerance: f64,
    /// Door width bounds in meters
    pub min_door_width: f64,
    pub max_door_width: f64,
    /// Artwork side bounds in meters
    pub min_artwork_size: f64,
    pub max_artwork_size: f64,
    /// Vertical link side bounds in meters
    pub min_link_width: f64,
    pub max_link_width: f64,
    /// Distance (plan units) under which an element counts as attached to a wall
    pub attachment_tolerance: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_room_area: 1.0,
            max_room_area: 100.0,
            duplicate_point_tolerance: 0.01,
            room_overlap_tolerance: 0.01,
            min_wall_length: 1.0,
            min_wall_thickness: 0.05,
            max_wall_thickness: 1.0,
            door_snap_tolerance: 0.3,
            min_door_width: 0.5,
            max_door_width: 10.0,
            min_artwork_size: 0.1,
            max_artwork_size: 20.0,
            min_link_width: 0.5,
            max_link_width: 15.0,
            attachment_tolerance: 1e-3,
        }
    }
}

/// History settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept, including the initial one
    pub max_size: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_size: 50 }
    }
}

/// View settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplicative factor applied by a single zoom step
    pub zoom_step: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.2,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid and snapping
    pub grid: GridSettings,
    /// Placement constraints
    pub constraints: Constraints,
    /// Undo/redo history
    pub history: HistorySettings,
    /// View bounds
    pub view: ViewSettings,
}

enum ConfigFormat {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists there yet
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no editor config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |key: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, "must be > 0"))
            }
        };
        let ordered = |key: &str, min: f64, max: f64| {
            if min <= max {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("minimum {} exceeds maximum {}", min, max)))
            }
        };

        let grid = &self.grid;
        positive("grid.grid_size", grid.grid_size)?;
        positive("grid.pixels_per_unit", grid.pixels_per_unit)?;
        positive("grid.grid_to_meters", grid.grid_to_meters)?;
        positive("grid.snap_threshold", grid.snap_threshold)?;
        positive("grid.vertex_snap_threshold", grid.vertex_snap_threshold)?;

        let c = &self.constraints;
        positive("constraints.min_room_area", c.min_room_area)?;
        ordered("constraints.room_area", c.min_room_area, c.max_room_area)?;
        positive("constraints.duplicate_point_tolerance", c.duplicate_point_tolerance)?;
        positive("constraints.room_overlap_tolerance", c.room_overlap_tolerance)?;
        positive("constraints.min_wall_length", c.min_wall_length)?;
        positive("constraints.min_wall_thickness", c.min_wall_thickness)?;
        ordered("constraints.wall_thickness", c.min_wall_thickness, c.max_wall_thickness)?;
        positive("constraints.door_snap_tolerance", c.door_snap_tolerance)?;
        positive("constraints.min_door_width", c.min_door_width)?;
        ordered("constraints.door_width", c.min_door_width, c.max_door_width)?;
        positive("constraints.min_artwork_size", c.min_artwork_size)?;
        ordered("constraints.artwork_size", c.min_artwork_size, c.max_artwork_size)?;
        positive("constraints.min_link_width", c.min_link_width)?;
        ordered("constraints.link_width", c.min_link_width, c.max_link_width)?;
        positive("constraints.attachment_tolerance", c.attachment_tolerance)?;

        if self.history.max_size < 2 {
            return Err(SettingsError::invalid(
                "history.max_size",
                "must keep at least two snapshots",
            ));
        }

        positive("view.min_zoom", self.view.min_zoom)?;
        ordered("view.zoom", self.view.min_zoom, self.view.max_zoom)?;
        if self.view.zoom_step <= 1.0 {
            return Err(SettingsError::invalid("view.zoom_step", "must be > 1"));
        }

        Ok(())
    }
}

/// Platform location of the editor config file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("museumkit").join("editor.toml"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no platform config directory".to_string()))
}
