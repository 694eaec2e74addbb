use floorkit_designer::geometry::direction_from_degrees;
use floorkit_designer::{FloorPlan, OpeningStyle, Point, Wall};
use proptest::prelude::*;

fn same_pair(a: [Point; 2], b: [Point; 2], eps: f64) -> bool {
    let straight = a[0].distance_to(&b[0]) < eps && a[1].distance_to(&b[1]) < eps;
    let crossed = a[0].distance_to(&b[1]) < eps && a[1].distance_to(&b[0]) < eps;
    straight || crossed
}

/// Direction of the second wall such that the two walls meet at 5..175
/// degrees, on either side of the first
fn joint_angle() -> impl Strategy<Value = f64> {
    prop_oneof![5.0..175.0f64, 185.0..355.0f64]
}

proptest! {
    #[test]
    fn corner_vertices_are_shared(
        angle in joint_angle(),
        thick_a in 50.0..300.0f64,
        thick_b in 50.0..300.0f64,
        jx in -5000.0..5000.0f64,
        jy in -5000.0..5000.0f64,
    ) {
        let joint = Point::new(jx, jy);
        let mut plan = FloorPlan::new();
        let a = plan.add_wall(Wall::new(joint - Point::new(1000.0, 0.0), joint, thick_a, 2400.0));
        let b = plan.add_wall(Wall::new(
            joint,
            joint + direction_from_degrees(angle) * 1000.0,
            thick_b,
            2400.0,
        ));

        let a = plan.wall(&a).map(|w| w.outline().to_vec()).unwrap_or_default();
        let b = plan.wall(&b).map(|w| w.outline().to_vec()).unwrap_or_default();
        prop_assert_eq!(a.len(), 4);
        prop_assert_eq!(b.len(), 4);
        prop_assert!(same_pair([a[1], a[2]], [b[0], b[3]], 1e-6));

        let limit = thick_a.max(thick_b) / 2.0 * 4.0;
        for p in [a[1], a[2]] {
            prop_assert!(joint.distance_to(&p) <= limit + 1e-9);
        }
    }

    #[test]
    fn hosted_opening_stays_inside_its_wall(
        length in 100.0..6000.0f64,
        width_ratio in 0.01..1.0f64,
        distance in -10_000.0..10_000.0f64,
        angle in 0.0..360.0f64,
    ) {
        let width = length * width_ratio;
        let mut plan = FloorPlan::new();
        let wall = plan.add_wall(Wall::new(
            Point::ZERO,
            direction_from_degrees(angle) * length,
            150.0,
            2400.0,
        ));
        let id = plan
            .add_opening(OpeningStyle::CasementWindow, width, 1000.0, 900.0, &wall, distance)
            .expect("hosted");

        let opening = plan.opening(id).expect("opening");
        let d = opening.distance_from_start();
        prop_assert!(d >= 0.0);
        prop_assert!(d + width <= length + 1e-6);
        prop_assert!(opening.is_visible());
    }

    #[test]
    fn dragged_opening_stays_on_the_centerline(
        sx in -3000.0..3000.0f64,
        sy in -3000.0..3000.0f64,
        angle in 0.0..360.0f64,
        length in 1000.0..5000.0f64,
        px in -8000.0..8000.0f64,
        py in -8000.0..8000.0f64,
    ) {
        let start = Point::new(sx, sy);
        let end = start + direction_from_degrees(angle) * length;
        let mut plan = FloorPlan::new();
        let wall = plan.add_wall(Wall::new(start, end, 150.0, 2400.0));
        let id = plan
            .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 0.0)
            .expect("hosted");

        let p = plan.drag_opening(id, Point::new(px, py)).expect("on wall");
        let dir = direction_from_degrees(angle);
        let offset = p - start;
        prop_assert!(dir.cross(&offset).abs() < 1e-6);
        let along = dir.dot(&offset);
        prop_assert!(along >= -1e-6 && along <= length - 900.0 + 1e-6);
    }
}
