use floorkit_designer::snapping::{orthogonal, snap};
use floorkit_designer::{Point, SnapParams, SnapTarget, Wall};

fn params(tolerance: f64) -> SnapParams {
    SnapParams {
        tolerance,
        ..SnapParams::default()
    }
}

#[test]
fn test_endpoint_beats_grid_at_equal_distance() {
    // both the wall start and the grid node sit 5 units away
    let wall = Wall::new(Point::new(100.0, -10.0), Point::new(100.0, -910.0), 100.0, 2400.0);
    let result = snap(Point::new(100.0, -5.0), [&wall], &params(10.0));
    assert_eq!(result.target, Some(SnapTarget::WallStart));
    assert_eq!(result.point, Point::new(100.0, -10.0));
}

#[test]
fn test_segment_foot_when_no_vertex_is_close() {
    let wall = Wall::new(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), 100.0, 2400.0);
    let result = snap(Point::new(333.0, 6.0), [&wall], &params(10.0));
    assert_eq!(result.target, Some(SnapTarget::Segment));
    assert_eq!(result.point, Point::new(333.0, 0.0));
}

#[test]
fn test_midpoint_wins_over_its_own_foot_on_tie() {
    let wall = Wall::new(Point::new(0.0, 0.0), Point::new(1030.0, 0.0), 100.0, 2400.0);
    let result = snap(Point::new(515.0, 4.0), [&wall], &params(10.0));
    assert_eq!(result.target, Some(SnapTarget::Midpoint));
}

#[test]
fn test_out_of_range_returns_raw_point() {
    let wall = Wall::new(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), 100.0, 2400.0);
    let mut p = params(10.0);
    p.grid_enabled = false;
    let raw = Point::new(450.0, 55.0);
    let result = snap(raw, [&wall], &p);
    assert!(!result.is_snapped());
    assert_eq!(result.point, raw);
}

#[test]
fn test_disabled_snap_is_identity() {
    let wall = Wall::new(Point::new(0.0, 0.0), Point::new(1000.0, 0.0), 100.0, 2400.0);
    let mut p = params(10.0);
    p.enabled = false;
    let raw = Point::new(1.0, 1.0);
    assert_eq!(snap(raw, [&wall], &p).point, raw);
}

#[test]
fn test_ortho_then_snap() {
    let anchor = Point::new(0.0, 0.0);
    let locked = orthogonal(Point::new(996.0, 40.0), anchor);
    assert_eq!(locked, Point::new(996.0, 0.0));

    let wall = Wall::new(Point::new(1000.0, -500.0), Point::new(1000.0, 500.0), 100.0, 2400.0);
    let result = snap(locked, [&wall], &params(10.0));
    assert_eq!(result.point, Point::new(1000.0, 0.0));
}
