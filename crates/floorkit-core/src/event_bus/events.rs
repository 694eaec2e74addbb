//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::InteractionMode;

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Design surface notifications
    Scene(SceneEvent),
    /// Project file lifecycle
    Project(ProjectEvent),
    /// Editor configuration
    Settings(SettingsEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::Project(_) => EventCategory::Project,
            AppEvent::Settings(_) => EventCategory::Settings,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Scene(e) => e.description(),
            AppEvent::Project(e) => e.description(),
            AppEvent::Settings(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Design surface events.
    Scene,
    /// Project file events.
    Project,
    /// Settings events.
    Settings,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Project => write!(f, "Project"),
            EventCategory::Settings => write!(f, "Settings"),
        }
    }
}

/// Events raised by a design surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A geometry-affecting mutation happened; consumers should re-pull.
    ContentChanged,
    /// The interaction mode changed.
    ModeChanged(InteractionMode),
    /// A calibration line was measured and awaits a real-world length.
    CalibrationRequested {
        /// Measured length of the reference line in scene units.
        measured_length: f64,
    },
}

impl SceneEvent {
    fn description(&self) -> String {
        match self {
            SceneEvent::ContentChanged => "Scene content changed".to_string(),
            SceneEvent::ModeChanged(mode) => format!("Mode: {}", mode),
            SceneEvent::CalibrationRequested { measured_length } => {
                format!("Calibration requested ({:.1} measured)", measured_length)
            }
        }
    }
}

/// Project file lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProjectEvent {
    /// Project saved.
    Saved {
        /// Destination file.
        path: PathBuf,
    },
    /// Project loaded.
    Loaded {
        /// Source file.
        path: PathBuf,
    },
    /// New empty project started.
    Created,
    /// Modified flag flipped.
    DirtyChanged {
        /// Whether there are unsaved changes.
        dirty: bool,
    },
    /// Autosave copy written.
    Autosaved {
        /// Autosave file.
        path: PathBuf,
        /// When the copy was written.
        at: DateTime<Utc>,
    },
}

impl ProjectEvent {
    fn description(&self) -> String {
        match self {
            ProjectEvent::Saved { path } => format!("Project saved: {}", path.display()),
            ProjectEvent::Loaded { path } => format!("Project loaded: {}", path.display()),
            ProjectEvent::Created => "New project".to_string(),
            ProjectEvent::DirtyChanged { dirty } => format!("Dirty: {}", dirty),
            ProjectEvent::Autosaved { path, at } => {
                format!("Autosaved {} at {}", path.display(), at.format("%H:%M:%S"))
            }
        }
    }
}

/// Settings events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// Settings loaded.
    Loaded,
    /// Settings saved.
    Saved,
}

impl SettingsEvent {
    fn description(&self) -> String {
        match self {
            SettingsEvent::Loaded => "Settings loaded".to_string(),
            SettingsEvent::Saved => "Settings saved".to_string(),
        }
    }
}
