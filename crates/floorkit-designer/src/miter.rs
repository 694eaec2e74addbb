//! Mitered wall outlines.
//!
//! Each wall end that touches another wall's endpoint (within the joint
//! tolerance) is joined to that single closest neighbor. Both offset edges
//! of the wall are intersected with the neighbor's offset edge on the same
//! physical side of the joint, so two walls meeting at a corner share the
//! exact same outer and inner vertices.
//!
//! Sharp joints would put the miter points far out; past the miter limit
//! both walls are instead cut flat along one shared line through the joint.
//! Collinear walls keep square ends.

use floorkit_core::constants::{MIN_WALL_LENGTH, MITER_LIMIT_RATIO, PARALLEL_EPSILON};

use crate::geometry::{line_intersection, Point};
use crate::wall::{Outline, Wall};

/// The wall joined at one end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the wall slice
    pub index: usize,
    /// Unit direction from the joint toward the neighbor's far end
    pub dir_along: Point,
    pub thickness: f64,
}

/// Offset corners at one end of a wall, relative to the direction pointing
/// away from the joint into the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinPoints {
    pub left: Point,
    pub right: Point,
}

/// Result of building one wall's outline
#[derive(Debug, Clone, PartialEq)]
pub struct WallOutline {
    pub polygon: Outline,
    pub start_neighbor: Option<usize>,
    pub end_neighbor: Option<usize>,
}

/// Find the wall whose start or end lies closest to `joint`, within
/// `tolerance`. Degenerate walls never qualify; on equal distance the wall
/// seen first wins.
pub fn find_neighbor(
    walls: &[Wall],
    self_index: usize,
    joint: Point,
    tolerance: f64,
) -> Option<Neighbor> {
    let mut best: Option<(f64, Neighbor)> = None;

    for (index, wall) in walls.iter().enumerate() {
        if index == self_index || wall.is_degenerate() {
            continue;
        }

        let dist_start = joint.distance_to(&wall.start());
        let dist_end = joint.distance_to(&wall.end());
        let dist = dist_start.min(dist_end);
        if dist > tolerance || best.as_ref().is_some_and(|(d, _)| dist >= *d) {
            continue;
        }

        let far = if dist_start <= dist_end {
            wall.end()
        } else {
            wall.start()
        };
        let along = far - joint;
        let length = along.length();
        if length < MIN_WALL_LENGTH {
            continue;
        }

        best = Some((
            dist,
            Neighbor {
                index,
                dir_along: along * (1.0 / length),
                thickness: wall.thickness(),
            },
        ));
    }

    best.map(|(_, n)| n)
}

/// Corner points at a joint.
///
/// `self_dir` points from the joint into this wall. Without a neighbor, or
/// when the two walls are parallel, the corners are plain perpendicular
/// offsets.
pub fn join_points(
    joint: Point,
    self_dir: Point,
    self_half: f64,
    neighbor: Option<&Neighbor>,
) -> JoinPoints {
    let normal = self_dir.perp();
    let mut points = JoinPoints {
        left: joint + normal * self_half,
        right: joint - normal * self_half,
    };

    let Some(neighbor) = neighbor else {
        return points;
    };

    let other_dir = neighbor.dir_along;
    let other_normal = other_dir.perp();
    let other_half = neighbor.thickness / 2.0;
    let miter_limit = self_half.max(other_half) * MITER_LIMIT_RATIO;

    let cross = self_dir.cross(&other_dir);
    if cross.abs() < PARALLEL_EPSILON {
        return points;
    }

    // Both directions point away from the joint, so this wall's left edge
    // lies on the same side as the neighbor's right edge.
    let other_left = joint + other_normal * other_half;
    let other_right = joint - other_normal * other_half;

    let within_limit = |p: &Point| joint.distance_to(p) <= miter_limit;

    let mitered = (
        line_intersection(points.left, self_dir, other_right, other_dir),
        line_intersection(points.right, self_dir, other_left, other_dir),
    );
    if let (Some(left), Some(right)) = mitered {
        if within_limit(&left) && within_limit(&right) {
            return JoinPoints { left, right };
        }
    }

    // Sharp joint: cut both walls along the same line through the joint by
    // crossing each edge with the neighbor's opposite-side edge. Both walls
    // derive these from the same pair of lines, so they still share corners.
    let cut = (
        line_intersection(points.left, self_dir, other_left, other_dir),
        line_intersection(points.right, self_dir, other_right, other_dir),
    );
    if let (Some(left), Some(right)) = cut {
        points.left = clamp_to_limit(joint, left, miter_limit);
        points.right = clamp_to_limit(joint, right, miter_limit);
    }

    points
}

/// Pull `p` back toward `joint` so it lies within `limit`
fn clamp_to_limit(joint: Point, p: Point, limit: f64) -> Point {
    let offset = p - joint;
    let dist = offset.length();
    if dist <= limit {
        p
    } else {
        joint + offset * (limit / dist)
    }
}

/// Build the outline of `walls[index]` against the rest of the slice.
pub fn build_outline(walls: &[Wall], index: usize, joint_tolerance: f64) -> WallOutline {
    let wall = &walls[index];
    let Some(forward) = wall.direction() else {
        return WallOutline {
            polygon: Outline::new(),
            start_neighbor: None,
            end_neighbor: None,
        };
    };

    let start_neighbor = find_neighbor(walls, index, wall.start(), joint_tolerance);
    let end_neighbor = find_neighbor(walls, index, wall.end(), joint_tolerance);

    let half = wall.thickness() / 2.0;
    let start_join = join_points(wall.start(), forward, half, start_neighbor.as_ref());
    let end_join = join_points(wall.end(), -forward, half, end_neighbor.as_ref());

    // The end join was computed looking backward, so its sides are swapped.
    let mut polygon = Outline::new();
    polygon.push(start_join.left);
    polygon.push(end_join.right);
    polygon.push(end_join.left);
    polygon.push(start_join.right);

    WallOutline {
        polygon,
        start_neighbor: start_neighbor.map(|n| n.index),
        end_neighbor: end_neighbor.map(|n| n.index),
    }
}
