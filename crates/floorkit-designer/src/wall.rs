//! Wall model.
//!
//! A wall is a centerline segment with a thickness and a height. Its
//! drawable outline is computed by the miter engine (see [`crate::miter`])
//! and cached here; the floor plan refreshes it whenever the wall or a
//! neighbor sharing one of its endpoints changes.

use floorkit_core::constants::MIN_WALL_LENGTH;
use lyon::path::Path;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::geometry::{self, direction_from_degrees, Point};
use crate::opening::OpeningId;

/// Stable wall identity, preserved across save/load
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(String);

impl WallId {
    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Use a persisted id, generating a new one if it is blank
    pub fn from_persisted(id: &str) -> Self {
        let id = id.trim();
        if id.is_empty() {
            Self::generate()
        } else {
            Self(id.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wall outline: start-left, end-left, end-right, start-right.
/// Empty for a degenerate wall.
pub type Outline = SmallVec<[Point; 4]>;

#[derive(Debug, Clone)]
pub struct Wall {
    id: WallId,
    start: Point,
    end: Point,
    thickness: f64,
    height: f64,
    openings: Vec<OpeningId>,
    outline: Outline,
    highlighted: bool,
}

impl Wall {
    /// New wall with a fresh id. Non-positive dimensions fall back to 1mm.
    pub fn new(start: Point, end: Point, thickness: f64, height: f64) -> Self {
        Self::with_id(WallId::generate(), start, end, thickness, height)
    }

    pub fn with_id(id: WallId, start: Point, end: Point, thickness: f64, height: f64) -> Self {
        Self {
            id,
            start,
            end,
            thickness: positive_or(thickness, 1.0),
            height: positive_or(height, 1.0),
            openings: Vec::new(),
            outline: Outline::new(),
            highlighted: false,
        }
    }

    pub fn id(&self) -> &WallId {
        &self.id
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Shorter than the minimum wall length
    pub fn is_degenerate(&self) -> bool {
        self.length() < MIN_WALL_LENGTH
    }

    /// Unit direction start -> end, `None` when degenerate
    pub fn direction(&self) -> Option<Point> {
        if self.is_degenerate() {
            return None;
        }
        Some((self.end - self.start) * (1.0 / self.length()))
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    /// Screen angle of the centerline in degrees, `[0, 360)`
    pub fn angle_degrees(&self) -> f64 {
        geometry::angle_degrees(self.start, self.end)
    }

    /// Point at arc length `distance` from the start along the centerline
    pub fn point_at_distance(&self, distance: f64) -> Point {
        match self.direction() {
            Some(dir) => self.start + dir * distance,
            None => self.start,
        }
    }

    /// Ids of attached openings, in attachment order
    pub fn openings(&self) -> &[OpeningId] {
        &self.openings
    }

    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    /// Outline as a closed path for renderers
    pub fn render(&self) -> Path {
        geometry::polygon_path(&self.outline)
    }

    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        geometry::polygon_bounds(&self.outline)
    }

    /// Whether `p` lies on the wall body
    pub fn contains_point(&self, p: Point) -> bool {
        geometry::point_in_polygon(p, &self.outline)
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub(crate) fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    pub(crate) fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    pub(crate) fn translate(&mut self, delta: Point) {
        self.start += delta;
        self.end += delta;
    }

    /// Rejects non-positive values
    pub(crate) fn set_thickness(&mut self, thickness: f64) -> bool {
        if !(thickness > 0.0 && thickness.is_finite()) {
            return false;
        }
        self.thickness = thickness;
        true
    }

    /// Rejects non-positive values
    pub(crate) fn set_height(&mut self, height: f64) -> bool {
        if !(height > 0.0 && height.is_finite()) {
            return false;
        }
        self.height = height;
        true
    }

    /// Rotate the end point about the start, keeping the length.
    /// Degenerate walls have no direction and are left unchanged.
    pub(crate) fn set_angle_degrees(&mut self, angle: f64) -> bool {
        if self.is_degenerate() || !angle.is_finite() {
            return false;
        }
        self.end = self.start + direction_from_degrees(angle) * self.length();
        true
    }

    pub(crate) fn set_outline(&mut self, outline: Outline) {
        self.outline = outline;
    }

    pub(crate) fn attach_opening(&mut self, id: OpeningId) {
        if !self.openings.contains(&id) {
            self.openings.push(id);
        }
    }

    pub(crate) fn detach_opening(&mut self, id: OpeningId) {
        self.openings.retain(|o| *o != id);
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}
