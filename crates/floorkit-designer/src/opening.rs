//! Doors and windows hosted on walls.
//!
//! An opening stores only a scalar distance along its host wall's
//! centerline. Its scene position and rotation are derived from the wall
//! every time the wall changes ([`Opening::sync_with_wall`]) and are never
//! set directly.

use floorkit_core::constants::{MIN_WALL_LENGTH, PROJECTION_EPSILON};
use floorkit_core::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{projection_parameter, Point};
use crate::wall::{Wall, WallId};

/// Tolerance for treating two distances as equal
const DISTANCE_EPSILON: f64 = 1e-9;

/// Identifier of an opening within a floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpeningId(pub u64);

impl fmt::Display for OpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opening-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
        }
    }

    pub fn parse(kind: &str) -> Result<Self, DocumentError> {
        match kind {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            other => Err(DocumentError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }

    /// Style used when none, or an unknown one, is given
    pub fn default_style(self) -> OpeningStyle {
        match self {
            Self::Door => OpeningStyle::SingleDoor,
            Self::Window => OpeningStyle::CasementWindow,
        }
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "Door"),
            Self::Window => write!(f, "Window"),
        }
    }
}

/// Construction style, tied to a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningStyle {
    SingleDoor,
    DoubleDoor,
    SlidingDoor,
    CasementWindow,
    SlidingWindow,
    BayWindow,
}

impl OpeningStyle {
    pub fn kind(self) -> OpeningKind {
        match self {
            Self::SingleDoor | Self::DoubleDoor | Self::SlidingDoor => OpeningKind::Door,
            Self::CasementWindow | Self::SlidingWindow | Self::BayWindow => OpeningKind::Window,
        }
    }

    /// Persisted name; unique only together with the kind ("sliding")
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleDoor => "single",
            Self::DoubleDoor => "double",
            Self::SlidingDoor | Self::SlidingWindow => "sliding",
            Self::CasementWindow => "casement",
            Self::BayWindow => "bay",
        }
    }

    pub fn parse(kind: OpeningKind, style: &str) -> Result<Self, DocumentError> {
        match (kind, style) {
            (OpeningKind::Door, "single") => Ok(Self::SingleDoor),
            (OpeningKind::Door, "double") => Ok(Self::DoubleDoor),
            (OpeningKind::Door, "sliding") => Ok(Self::SlidingDoor),
            (OpeningKind::Window, "casement") => Ok(Self::CasementWindow),
            (OpeningKind::Window, "sliding") => Ok(Self::SlidingWindow),
            (OpeningKind::Window, "bay") => Ok(Self::BayWindow),
            (kind, style) => Err(DocumentError::UnknownStyle {
                kind: kind.as_str().to_string(),
                style: style.to_string(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SingleDoor => "Single door",
            Self::DoubleDoor => "Double door",
            Self::SlidingDoor => "Sliding door",
            Self::CasementWindow => "Casement window",
            Self::SlidingWindow => "Sliding window",
            Self::BayWindow => "Bay window",
        }
    }
}

/// Derived scene placement of an opening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Point on the host centerline where the opening begins
    pub position: Point,
    /// Negated wall angle in degrees, so local +x runs along the wall
    pub rotation: f64,
    /// Unit direction of the host wall
    pub along: Point,
    pub width: f64,
}

impl Placement {
    /// Point on the centerline where the opening ends
    pub fn end(&self) -> Point {
        self.position + self.along * self.width
    }

    pub fn center(&self) -> Point {
        self.position + self.along * (self.width / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct Opening {
    id: OpeningId,
    style: OpeningStyle,
    width: f64,
    height: f64,
    sill_height: f64,
    distance: f64,
    flipped: bool,
    preview: bool,
    wall: Option<WallId>,
    placement: Option<Placement>,
}

impl Opening {
    /// Unhosted opening. Invalid width or height fall back to 1mm;
    /// doors always have a zero sill.
    pub fn new(id: OpeningId, style: OpeningStyle, width: f64, height: f64, sill: f64) -> Self {
        let sill_height = match style.kind() {
            OpeningKind::Door => 0.0,
            OpeningKind::Window => sill.max(0.0),
        };
        Self {
            id,
            style,
            width: if width > 0.0 { width } else { 1.0 },
            height: if height > 0.0 { height } else { 1.0 },
            sill_height,
            distance: 0.0,
            flipped: false,
            preview: false,
            wall: None,
            placement: None,
        }
    }

    pub fn id(&self) -> OpeningId {
        self.id
    }

    pub fn kind(&self) -> OpeningKind {
        self.style.kind()
    }

    pub fn style(&self) -> OpeningStyle {
        self.style
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sill_height(&self) -> f64 {
        self.sill_height
    }

    pub fn distance_from_start(&self) -> f64 {
        self.distance
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Host wall id
    pub fn wall(&self) -> Option<&WallId> {
        self.wall.as_ref()
    }

    /// Current placement; `None` while unhosted, on a degenerate wall, or
    /// when the opening is wider than its wall.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.placement.is_some()
    }

    /// Clamp a start distance into `[0, max(0, L - width)]` for `host`.
    /// Zero when there is no usable host.
    pub fn clamp_distance(&self, distance: f64, host: Option<&Wall>) -> f64 {
        let length = match host {
            Some(wall) if wall.length() >= MIN_WALL_LENGTH => wall.length(),
            _ => return 0.0,
        };
        let max_start = (length - self.width).max(0.0);
        if distance.is_nan() {
            return 0.0;
        }
        distance.clamp(0.0, max_start)
    }

    /// Rebind to a new host (or none) and resync
    pub(crate) fn set_wall(&mut self, wall: Option<&Wall>) {
        self.wall = wall.map(|w| w.id().clone());
        self.sync_with_wall(wall);
    }

    /// Set the start distance, clamped. Returns false when nothing changed.
    pub(crate) fn set_distance_from_start(&mut self, distance: f64, host: Option<&Wall>) -> bool {
        let clamped = self.clamp_distance(distance, host);
        if (clamped - self.distance).abs() <= DISTANCE_EPSILON {
            return false;
        }
        self.distance = clamped;
        self.sync_with_wall(host);
        true
    }

    /// Set the width. Rejects non-positive widths and, while hosted, widths
    /// that exceed the host wall's length.
    pub(crate) fn set_width(&mut self, width: f64, host: Option<&Wall>) -> bool {
        if !(width > 0.0 && width.is_finite()) {
            return false;
        }
        if let Some(wall) = host {
            if width > wall.length() {
                tracing::debug!(
                    "Rejected width {:.1} for {} on wall of length {:.1}",
                    width,
                    self.id,
                    wall.length()
                );
                return false;
            }
        }
        self.width = width;
        self.distance = self.clamp_distance(self.distance, host);
        self.sync_with_wall(host);
        true
    }

    /// Rejects non-positive heights
    pub(crate) fn set_height(&mut self, height: f64) -> bool {
        if !(height > 0.0 && height.is_finite()) {
            return false;
        }
        self.height = height;
        true
    }

    /// Negative sills clamp to zero. Doors keep a zero sill.
    pub(crate) fn set_sill_height(&mut self, sill: f64) -> bool {
        if self.kind() == OpeningKind::Door || sill.is_nan() {
            return false;
        }
        self.sill_height = sill.max(0.0);
        true
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    pub(crate) fn toggle_flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub(crate) fn set_preview(&mut self, preview: bool) {
        self.preview = preview;
    }

    /// Re-derive placement from the host wall, re-clamping the distance
    /// for the wall's current length.
    pub(crate) fn sync_with_wall(&mut self, host: Option<&Wall>) {
        let Some(wall) = host else {
            self.placement = None;
            return;
        };

        self.distance = self.clamp_distance(self.distance, Some(wall));

        let fits = self.distance + self.width <= wall.length() + DISTANCE_EPSILON;
        self.placement = match wall.direction() {
            Some(along) if fits => Some(Placement {
                position: wall.start() + along * self.distance,
                rotation: -wall.angle_degrees(),
                along,
                width: self.width,
            }),
            _ => None,
        };
    }

    /// Slide along the host toward a proposed scene point.
    ///
    /// The point is projected onto the centerline and clamped; the returned
    /// position always lies on the wall.
    pub(crate) fn drag_to(&mut self, proposed: Point, host: &Wall) -> Point {
        let along = project_distance(proposed, host);
        self.distance = self.clamp_distance(along, Some(host));
        self.sync_with_wall(Some(host));
        host.point_at_distance(self.distance)
    }
}

/// Arc length along `wall` of the projection of `p`, clamped to the wall
pub fn project_distance(p: Point, wall: &Wall) -> f64 {
    let length = wall.length();
    if length * length < PROJECTION_EPSILON {
        return 0.0;
    }
    match projection_parameter(p, wall.start(), wall.end()) {
        Some(t) => t.clamp(0.0, 1.0) * length,
        None => 0.0,
    }
}
