//! File I/O operations (save, load, new, autosave) for designer state.

use anyhow::Context;
use chrono::Utc;
use floorkit_core::constants::PLAN_FILE_EXTENSION;
use floorkit_core::{AppEvent, ProjectEvent};
use std::path::{Path, PathBuf};

use super::DesignerState;
use crate::serialization::PlanDocument;

impl DesignerState {
    /// Save the plan, appending the plan extension when the path has none.
    /// Returns the path actually written.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let path = with_plan_extension(path.as_ref());

        let mut doc = PlanDocument::from_scene(self.surface.plan(), self.surface.blueprint());
        doc.project_info.created_at = self.created_at;
        doc.save_to_file(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        tracing::info!("Saved plan to {}", path.display());
        self.current_file_path = Some(path.clone());
        self.config.add_recent_file(path.clone());
        self.mark_saved();
        self.surface
            .event_bus()
            .publish(AppEvent::Project(ProjectEvent::Saved { path: path.clone() }));
        Ok(path)
    }

    /// Save back to the file the plan came from
    pub fn save(&mut self) -> anyhow::Result<PathBuf> {
        let path = self
            .current_file_path
            .clone()
            .context("Plan has not been saved yet")?;
        self.save_to_file(path)
    }

    /// Load a plan, replacing the current scene
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let doc = PlanDocument::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let (plan, blueprint) = doc
            .to_scene()
            .with_context(|| format!("Invalid plan in {}", path.display()))?;

        tracing::info!(
            "Loaded {} wall(s) and {} opening(s) from {}",
            plan.wall_count(),
            plan.openings().len(),
            path.display()
        );
        self.surface.replace_content(plan, blueprint);
        self.created_at = doc.project_info.created_at;
        self.current_file_path = Some(path.to_path_buf());
        self.design_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();
        self.last_autosave = None;
        self.config.add_recent_file(path.to_path_buf());
        self.mark_saved();
        self.surface
            .event_bus()
            .publish(AppEvent::Project(ProjectEvent::Loaded {
                path: path.to_path_buf(),
            }));
        Ok(())
    }

    /// Create new design (clear all).
    pub fn new_design(&mut self) {
        self.surface.reset();
        self.current_file_path = None;
        self.design_name = "Untitled".to_string();
        self.created_at = Utc::now();
        self.last_autosave = None;
        self.mark_saved();
        self.surface
            .event_bus()
            .publish(AppEvent::Project(ProjectEvent::Created));
    }

    /// Where the autosave copy goes: next to the project file, or in the
    /// platform data directory for an unsaved project.
    pub fn autosave_path(&self) -> Option<PathBuf> {
        let file_name = |stem: &str| format!("{}.autosave.{}", stem, PLAN_FILE_EXTENSION);
        match &self.current_file_path {
            Some(path) => {
                let stem = path.file_stem()?.to_str()?;
                Some(path.with_file_name(file_name(stem)))
            }
            None => dirs::data_dir().map(|dir| dir.join("floorkit").join(file_name("untitled"))),
        }
    }

    /// Write the autosave copy. The project itself stays modified.
    pub fn save_autosave(&mut self) -> anyhow::Result<PathBuf> {
        let path = self
            .autosave_path()
            .context("No location available for autosave")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut doc = PlanDocument::from_scene(self.surface.plan(), self.surface.blueprint());
        doc.project_info.created_at = self.created_at;
        doc.save_to_file(&path)?;

        let at = Utc::now();
        self.last_autosave = Some(at);
        tracing::debug!("Autosaved to {}", path.display());
        self.surface
            .event_bus()
            .publish(AppEvent::Project(ProjectEvent::Autosaved {
                path: path.clone(),
                at,
            }));
        Ok(path)
    }

    pub fn has_autosave(&self) -> bool {
        self.autosave_path().is_some_and(|p| p.exists())
    }

    pub fn remove_autosave(&self) -> anyhow::Result<()> {
        if let Some(path) = self.autosave_path().filter(|p| p.exists()) {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    /// Recent plan files, most recent first
    pub fn recent_files(&self) -> &[PathBuf] {
        &self.config.recent_files
    }
}

fn with_plan_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PLAN_FILE_EXTENSION)
    }
}
