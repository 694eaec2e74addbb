//! FloorKit Settings Crate
//!
//! Editor configuration: defaults for new walls, snapping behaviour,
//! opening drop thresholds, autosave and the recent files list.

pub mod config;
pub mod error;

pub use config::{
    config_dir, default_config_path, Config, OpeningSettings, ProjectSettings, SnapSettings,
    WallSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
