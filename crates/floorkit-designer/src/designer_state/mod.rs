//! Project state for UI integration.
//!
//! Wraps a [`DesignSurface`] with everything that belongs to the open
//! project rather than to the scene: the file it came from, whether it has
//! unsaved changes, autosave bookkeeping and the recent files list.
//! File operations live in `file_io`.

mod file_io;

use chrono::{DateTime, Utc};
use floorkit_core::{AppEvent, ProjectEvent};
use floorkit_settings::Config;
use std::path::PathBuf;

use crate::surface::DesignSurface;

/// Project state for UI integration
pub struct DesignerState {
    pub surface: DesignSurface,
    pub config: Config,
    pub current_file_path: Option<PathBuf>,
    pub design_name: String,
    created_at: DateTime<Utc>,
    saved_revision: u64,
    last_autosave: Option<DateTime<Utc>>,
    reported_dirty: bool,
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerState {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a project whose surface follows `config`
    pub fn with_config(config: Config) -> Self {
        let mut surface = DesignSurface::new();
        surface.apply_config(&config);
        let saved_revision = surface.revision();
        Self {
            surface,
            config,
            current_file_path: None,
            design_name: "Untitled".to_string(),
            created_at: Utc::now(),
            saved_revision,
            last_autosave: None,
            reported_dirty: false,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the scene changed since the last save or load
    pub fn is_modified(&self) -> bool {
        self.surface.revision() != self.saved_revision
    }

    /// Publish a dirty-flag change if there is one. Call after handling
    /// input so the title bar can follow.
    pub fn refresh_modified(&mut self) -> bool {
        let dirty = self.is_modified();
        if dirty != self.reported_dirty {
            self.reported_dirty = dirty;
            self.surface
                .event_bus()
                .publish(AppEvent::Project(ProjectEvent::DirtyChanged { dirty }));
        }
        dirty
    }

    /// Whether an autosave should be written at `now`
    pub fn autosave_due(&self, now: DateTime<Utc>) -> bool {
        if !self.config.project.autosave_enabled || !self.is_modified() {
            return false;
        }
        let interval = i64::try_from(self.config.project.autosave_interval_secs).unwrap_or(i64::MAX);
        match self.last_autosave {
            Some(last) => (now - last).num_seconds() >= interval,
            None => true,
        }
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(&self.design_name);

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    fn mark_saved(&mut self) {
        self.saved_revision = self.surface.revision();
        self.refresh_modified();
    }
}
