//! Snapping subsystem.
//!
//! A pure function of the cursor position, the candidate walls and the
//! snap settings. Candidates are evaluated in a fixed order and the first
//! strictly closest one wins:
//! start, end, midpoint and perpendicular foot of every wall, then the
//! nearest grid intersection.

use floorkit_core::constants::{DEFAULT_GRID_SIZE, DEFAULT_SNAP_TOLERANCE};
use floorkit_settings::SnapSettings;

use crate::geometry::{projection_parameter, Point};
use crate::wall::Wall;

/// What a snapped point was attracted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    WallStart,
    WallEnd,
    Midpoint,
    Segment,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapParams {
    pub enabled: bool,
    pub grid_enabled: bool,
    pub tolerance: f64,
    pub grid_size: f64,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_enabled: true,
            tolerance: DEFAULT_SNAP_TOLERANCE,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl From<&SnapSettings> for SnapParams {
    fn from(settings: &SnapSettings) -> Self {
        Self {
            enabled: settings.enabled,
            grid_enabled: settings.grid_enabled,
            tolerance: settings.tolerance,
            grid_size: settings.grid_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Snapped point, or the input point when nothing was in range
    pub point: Point,
    pub target: Option<SnapTarget>,
}

impl SnapResult {
    fn raw(point: Point) -> Self {
        Self {
            point,
            target: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.target.is_some()
    }
}

/// Snap `pos` to the closest candidate within tolerance.
///
/// The caller passes only the walls that may attract: the wall being drawn
/// or edited must already be filtered out. Degenerate walls are skipped.
pub fn snap<'a>(
    pos: Point,
    walls: impl IntoIterator<Item = &'a Wall>,
    params: &SnapParams,
) -> SnapResult {
    if !params.enabled {
        return SnapResult::raw(pos);
    }

    let mut best_dist = params.tolerance + 1.0;
    let mut best: Option<(Point, SnapTarget)> = None;
    let mut consider = |candidate: Point, target: SnapTarget| {
        let dist = pos.distance_to(&candidate);
        if dist < best_dist {
            best_dist = dist;
            best = Some((candidate, target));
        }
    };

    for wall in walls {
        if wall.is_degenerate() {
            continue;
        }
        consider(wall.start(), SnapTarget::WallStart);
        consider(wall.end(), SnapTarget::WallEnd);
        consider(wall.midpoint(), SnapTarget::Midpoint);

        if let Some(t) = projection_parameter(pos, wall.start(), wall.end()) {
            if (0.0..=1.0).contains(&t) {
                let foot = wall.start() + (wall.end() - wall.start()) * t;
                consider(foot, SnapTarget::Segment);
            }
        }
    }

    if params.grid_enabled && params.grid_size > 0.0 {
        consider(grid_point(pos, params.grid_size), SnapTarget::Grid);
    }

    match best {
        Some((point, target)) if best_dist <= params.tolerance => SnapResult {
            point,
            target: Some(target),
        },
        _ => SnapResult::raw(pos),
    }
}

/// Nearest grid intersection
pub fn grid_point(pos: Point, grid_size: f64) -> Point {
    Point::new(
        (pos.x / grid_size).round() * grid_size,
        (pos.y / grid_size).round() * grid_size,
    )
}

/// Lock `pos` to the horizontal or vertical line through `anchor`,
/// whichever axis has the larger deviation.
pub fn orthogonal(pos: Point, anchor: Point) -> Point {
    let dx = (pos.x - anchor.x).abs();
    let dy = (pos.y - anchor.y).abs();
    if dx >= dy {
        Point::new(pos.x, anchor.y)
    } else {
        Point::new(anchor.x, pos.y)
    }
}

/// Same axis lock applied to a direction vector
pub fn orthogonal_vector(v: Point) -> Point {
    if v.x.abs() >= v.y.abs() {
        Point::new(v.x, 0.0)
    } else {
        Point::new(0.0, v.y)
    }
}
