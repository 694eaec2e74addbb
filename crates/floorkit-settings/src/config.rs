//! Editor configuration for FloorKit
//!
//! Stored as JSON or TOML (picked by file extension) in the platform
//! config directory. Sections:
//! - Wall defaults applied to newly drawn walls
//! - Snapping (tolerance, grid, joint tolerance)
//! - Opening drop thresholds
//! - Project handling (autosave, recent files)

use floorkit_core::constants::{
    DEFAULT_GRID_SIZE, DEFAULT_RECENT_FILES, DEFAULT_SNAP_TOLERANCE, DEFAULT_WALL_HEIGHT,
    DEFAULT_WALL_THICKNESS, DROP_SEARCH_RADIUS, DROP_SNAP_DISTANCE, JOINT_TOLERANCE,
};
pub use floorkit_core::units::LengthUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Defaults for newly drawn walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSettings {
    pub thickness: f64,
    pub height: f64,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_WALL_THICKNESS,
            height: DEFAULT_WALL_HEIGHT,
        }
    }
}

/// Snapping behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Master switch for wall and grid snapping
    pub enabled: bool,
    /// Whether grid intersections are snap candidates
    pub grid_enabled: bool,
    /// Maximum cursor distance for a snap to take effect
    pub tolerance: f64,
    pub grid_size: f64,
    /// Endpoints closer than this are treated as a wall joint
    #[serde(default = "default_joint_tolerance")]
    pub joint_tolerance: f64,
}

fn default_joint_tolerance() -> f64 {
    JOINT_TOLERANCE
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_enabled: true,
            tolerance: DEFAULT_SNAP_TOLERANCE,
            grid_size: DEFAULT_GRID_SIZE,
            joint_tolerance: JOINT_TOLERANCE,
        }
    }
}

/// Door and window drop thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningSettings {
    /// How far from a wall a drop may land and still attach
    pub drop_search_radius: f64,
    /// Center snaps to wall start, middle or end within this distance
    pub drop_snap_distance: f64,
}

impl Default for OpeningSettings {
    fn default() -> Self {
        Self {
            drop_search_radius: DROP_SEARCH_RADIUS,
            drop_snap_distance: DROP_SNAP_DISTANCE,
        }
    }
}

/// Project file handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub autosave_enabled: bool,
    pub autosave_interval_secs: u64,
    /// Number of recent files to track
    pub recent_files_count: usize,
    #[serde(default)]
    pub display_unit: LengthUnit,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            autosave_enabled: true,
            autosave_interval_secs: 120,
            recent_files_count: DEFAULT_RECENT_FILES,
            display_unit: LengthUnit::Millimeter,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
    #[serde(default)]
    pub walls: WallSettings,
    #[serde(default)]
    pub snapping: SnapSettings,
    #[serde(default)]
    pub openings: OpeningSettings,
    #[serde(default)]
    pub project: ProjectSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("walls.thickness", self.walls.thickness),
            ("walls.height", self.walls.height),
            ("snapping.tolerance", self.snapping.tolerance),
            ("snapping.grid_size", self.snapping.grid_size),
            ("snapping.joint_tolerance", self.snapping.joint_tolerance),
            ("openings.drop_search_radius", self.openings.drop_search_radius),
            ("openings.drop_snap_distance", self.openings.drop_snap_distance),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be > 0, got {}", value),
                ));
            }
        }

        if self.project.recent_files_count == 0 {
            return Err(SettingsError::invalid(
                "project.recent_files_count",
                "must be > 0",
            ));
        }

        Ok(())
    }

    /// Add file to the front of the recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files
            .truncate(self.project.recent_files_count);
    }

    /// Drop recent entries whose file no longer exists
    pub fn prune_recent_files(&mut self) {
        self.recent_files.retain(|f| f.exists());
    }
}

/// Platform config directory for FloorKit
pub fn config_dir() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("floorkit"))
        .ok_or_else(|| ConfigError::NoConfigDirectory(std::env::consts::OS.to_string()).into())
}

/// Default location of the config file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
