//! Serialization and deserialization for floor plan files.
//!
//! A `.fkplan` file is a JSON document holding project metadata, the
//! blueprint settings, the walls and the openings. Openings refer to their
//! host by wall id, so loading rebuilds every wall first, binds openings
//! second and only then computes geometry, once, for the whole plan.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use floorkit_core::constants::{DEFAULT_WALL_HEIGHT, DEFAULT_WALL_THICKNESS, PLAN_FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::blueprint::{Blueprint, DEFAULT_BLUEPRINT_OPACITY};
use crate::geometry::Point;
use crate::opening::{OpeningKind, OpeningStyle};
use crate::plan::FloorPlan;
use crate::wall::{Wall, WallId};

/// Complete plan file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub project_info: ProjectInfo,
    #[serde(default)]
    pub settings: PlanSettings,
    #[serde(default)]
    pub walls: Vec<WallData>,
    #[serde(default)]
    pub openings: Vec<OpeningData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub version: String,
    pub created_at: DateTime<Utc>,
}

/// Blueprint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Empty when the plan has no blueprint
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,
    /// Scene units per image pixel
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            background_image: String::new(),
            image_width: 0,
            image_height: 0,
            pixel_ratio: default_pixel_ratio(),
            opacity: default_opacity(),
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallData {
    #[serde(default)]
    pub id: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningData {
    pub wall_id: String,
    pub kind: String,
    pub style: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub sill: f64,
    #[serde(default)]
    pub distance_from_start: f64,
    #[serde(default)]
    pub flipped: bool,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    DEFAULT_BLUEPRINT_OPACITY
}

fn default_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

fn default_height() -> f64 {
    DEFAULT_WALL_HEIGHT
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanDocument {
    /// Create an empty document stamped with the current time
    pub fn new() -> Self {
        Self {
            project_info: ProjectInfo {
                version: PLAN_FORMAT_VERSION.to_string(),
                created_at: Utc::now(),
            },
            settings: PlanSettings::default(),
            walls: Vec::new(),
            openings: Vec::new(),
        }
    }

    /// Capture a plan. Degenerate walls are not written.
    pub fn from_scene(plan: &FloorPlan, blueprint: Option<&Blueprint>) -> Self {
        let mut doc = Self::new();

        if let Some(bp) = blueprint {
            let (w, h) = bp.pixel_size();
            doc.settings = PlanSettings {
                background_image: bp.path().to_string_lossy().into_owned(),
                image_width: w,
                image_height: h,
                pixel_ratio: bp.scale(),
                opacity: bp.opacity(),
                rotation: bp.rotation(),
            };
        }

        for wall in plan.walls() {
            doc.walls.push(WallData {
                id: wall.id().to_string(),
                start: [wall.start().x, wall.start().y],
                end: [wall.end().x, wall.end().y],
                thickness: wall.thickness(),
                height: wall.height(),
            });

            for opening in plan.openings_on(wall.id()) {
                doc.openings.push(OpeningData {
                    wall_id: wall.id().to_string(),
                    kind: opening.kind().as_str().to_string(),
                    style: opening.style().as_str().to_string(),
                    width: opening.width(),
                    height: opening.height(),
                    sill: opening.sill_height(),
                    distance_from_start: opening.distance_from_start(),
                    flipped: opening.is_flipped(),
                });
            }
        }

        doc
    }

    /// Rebuild the scene described by this document.
    ///
    /// Unknown opening kinds or styles are errors. Openings pointing at a
    /// wall that is not in the document, and degenerate walls, are skipped.
    pub fn to_scene(&self) -> floorkit_core::Result<(FloorPlan, Option<Blueprint>)> {
        let mut plan = FloorPlan::new();

        for data in &self.walls {
            let wall = Wall::with_id(
                WallId::from_persisted(&data.id),
                Point::new(data.start[0], data.start[1]),
                Point::new(data.end[0], data.end[1]),
                data.thickness,
                data.height,
            );
            if wall.is_degenerate() {
                tracing::warn!("Skipping degenerate wall {}", wall.id());
                continue;
            }
            plan.push_wall(wall);
        }

        for data in &self.openings {
            let kind = OpeningKind::parse(&data.kind)?;
            let style = OpeningStyle::parse(kind, &data.style)?;

            let wall_id = WallId::from_persisted(&data.wall_id);
            if plan.wall(&wall_id).is_none() {
                tracing::warn!("Skipping {} on unknown wall {}", style.label(), data.wall_id);
                continue;
            }

            let opening = plan.new_opening(style, data.width, data.height, data.sill);
            if let Some(id) = plan.insert_opening(opening, &wall_id, data.distance_from_start) {
                plan.set_opening_flipped(id, data.flipped);
            }
        }

        plan.rebuild_all();

        let blueprint = (!self.settings.background_image.is_empty()).then(|| {
            let mut bp = Blueprint::new(
                &self.settings.background_image,
                self.settings.image_width,
                self.settings.image_height,
            );
            let ratio = if self.settings.pixel_ratio > 0.0 {
                self.settings.pixel_ratio
            } else {
                1.0
            };
            bp.set_scale(ratio);
            bp.set_opacity(self.settings.opacity);
            bp.set_rotation(self.settings.rotation);
            bp
        });

        Ok((plan, blueprint))
    }

    pub fn to_json(&self) -> floorkit_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> floorkit_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json().context("Failed to serialize plan")?;
        std::fs::write(path.as_ref(), json).context("Failed to write plan file")?;
        tracing::debug!("Wrote plan to {}", path.as_ref().display());
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read plan file")?;
        let doc = Self::from_json(&content).context("Failed to parse plan file")?;
        Ok(doc)
    }
}
