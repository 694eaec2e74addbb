//! 2D geometry primitives.
//!
//! Scene coordinates are millimeters with +y pointing down the screen, so
//! angles follow the screen convention: counter-clockwise as seen by the
//! user, `atan2(-dy, dx)`, normalized to `[0, 360)`.

use floorkit_core::constants::{PARALLEL_EPSILON, PROJECTION_EPSILON};
use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point or a vector in scene space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, `None` for a (near) zero vector
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len < PARALLEL_EPSILON {
            None
        } else {
            Some(*self * (1.0 / len))
        }
    }

    /// Left-hand normal `(-y, x)`
    pub fn perp(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Intersection of the infinite lines `p1 + t*d1` and `p2 + u*d2`.
///
/// `None` when the directions are parallel or antiparallel.
pub fn line_intersection(p1: Point, d1: Point, p2: Point, d2: Point) -> Option<Point> {
    let denom = d1.cross(&d2);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (p2 - p1).cross(&d2) / denom;
    Some(p1 + d1 * t)
}

/// Projection parameter of `p` onto segment `a -> b`, unclamped.
///
/// `None` for a segment too short to project onto.
pub fn projection_parameter(p: Point, a: Point, b: Point) -> Option<f64> {
    let dir = b - a;
    let len_sq = dir.dot(&dir);
    if len_sq < PROJECTION_EPSILON {
        return None;
    }
    Some((p - a).dot(&dir) / len_sq)
}

/// Nearest point on segment `a -> b` and its clamped parameter in `[0, 1]`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    match projection_parameter(p, a, b) {
        Some(t) => {
            let t = t.clamp(0.0, 1.0);
            (a + (b - a) * t, t)
        }
        None => (a, 0.0),
    }
}

/// Direction angle of `from -> to` in degrees, `[0, 360)`, screen counter-clockwise
pub fn angle_degrees(from: Point, to: Point) -> f64 {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return 0.0;
    }
    let deg = (-d.y).atan2(d.x).to_degrees();
    if deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Unit vector for a screen angle in degrees (inverse of [`angle_degrees`])
pub fn direction_from_degrees(angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(rad.cos(), -rad.sin())
}

/// Even-odd point in polygon test
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Closed lyon path through the polygon vertices, for renderers
pub fn polygon_path(polygon: &[Point]) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = polygon.split_first() {
        builder.begin(point(first.x as f32, first.y as f32));
        for p in rest {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.end(true);
    }
    builder.build()
}

/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)`
pub fn polygon_bounds(polygon: &[Point]) -> Option<(f64, f64, f64, f64)> {
    if polygon.is_empty() {
        return None;
    }
    let bb = lyon::algorithms::aabb::bounding_box(polygon_path(polygon).iter());
    Some((
        bb.min.x as f64,
        bb.min.y as f64,
        bb.max.x as f64,
        bb.max.y as f64,
    ))
}
