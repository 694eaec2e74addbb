use floorkit_designer::{FloorPlan, OpeningStyle, Point, Wall, WallId};

fn plan_with_wall(length: f64) -> (FloorPlan, WallId) {
    let mut plan = FloorPlan::new();
    let id = plan.add_wall(Wall::new(Point::ZERO, Point::new(length, 0.0), 200.0, 2400.0));
    (plan, id)
}

#[test]
fn test_width_wider_than_host_is_rejected() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 0.0)
        .expect("door");

    assert!(!plan.set_opening_width(door, 2200.0));
    let door = plan.opening(door).expect("door");
    assert_eq!(door.width(), 900.0);
    assert_eq!(door.distance_from_start(), 0.0);
}

#[test]
fn test_distance_is_clamped_to_the_wall() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 5000.0)
        .expect("door");
    assert_eq!(plan.opening(door).map(|o| o.distance_from_start()), Some(1100.0));

    plan.set_opening_distance(door, -40.0);
    assert_eq!(plan.opening(door).map(|o| o.distance_from_start()), Some(0.0));
}

#[test]
fn test_shrinking_the_wall_pulls_openings_back() {
    let (mut plan, wall) = plan_with_wall(3000.0);
    let window = plan
        .add_opening(OpeningStyle::CasementWindow, 1000.0, 1000.0, 900.0, &wall, 1800.0)
        .expect("window");

    plan.set_wall_end(&wall, Point::new(2500.0, 0.0));
    let window = plan.opening(window).expect("window");
    assert_eq!(window.distance_from_start(), 1500.0);
    let placement = window.placement().expect("visible");
    assert!(placement.end().distance_to(&Point::new(2500.0, 0.0)) < 1e-9);
}

#[test]
fn test_wall_shorter_than_opening_hides_it() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::DoubleDoor, 1500.0, 2100.0, 0.0, &wall, 200.0)
        .expect("door");

    plan.set_wall_end(&wall, Point::new(1000.0, 0.0));
    let opening = plan.opening(door).expect("door");
    assert!(!opening.is_visible());
    assert_eq!(opening.distance_from_start(), 0.0);

    // lengthening the wall brings it back
    plan.set_wall_end(&wall, Point::new(1800.0, 0.0));
    assert!(plan.opening(door).is_some_and(|o| o.is_visible()));
}

#[test]
fn test_rotating_the_wall_carries_the_opening() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 500.0)
        .expect("door");

    plan.set_wall_angle(&wall, 270.0);
    let placement = *plan
        .opening(door)
        .and_then(|o| o.placement())
        .expect("placement");
    assert!(placement.position.distance_to(&Point::new(0.0, 500.0)) < 1e-9);
    assert!((placement.rotation + 270.0).abs() < 1e-9);
}

#[test]
fn test_opening_on_degenerate_wall_is_refused() {
    let mut plan = FloorPlan::new();
    let stub = plan.add_wall(Wall::new(Point::ZERO, Point::new(0.05, 0.0), 200.0, 2400.0));
    assert!(plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &stub, 0.0)
        .is_none());
    assert!(plan.openings().is_empty());
}

#[test]
fn test_new_opening_wider_than_wall_is_refused() {
    let (mut plan, wall) = plan_with_wall(500.0);
    assert!(plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 0.0)
        .is_none());
    assert!(plan.openings().is_empty());
    assert!(plan.wall(&wall).is_some_and(|w| w.openings().is_empty()));

    // exactly the wall's length still fits
    assert!(plan
        .add_opening(OpeningStyle::SingleDoor, 500.0, 2100.0, 0.0, &wall, 0.0)
        .is_some());
}

#[test]
fn test_removing_host_removes_openings() {
    let (mut plan, wall) = plan_with_wall(4000.0);
    plan.add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 100.0);
    plan.add_opening(OpeningStyle::SlidingWindow, 1200.0, 1000.0, 900.0, &wall, 2000.0);
    assert_eq!(plan.openings_on(&wall).count(), 2);

    plan.remove_wall(&wall);
    assert!(plan.openings().is_empty());
}

#[test]
fn test_door_sill_stays_on_the_floor() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::SlidingDoor, 900.0, 2100.0, 300.0, &wall, 0.0)
        .expect("door");
    assert_eq!(plan.opening(door).map(|o| o.sill_height()), Some(0.0));
    assert!(!plan.set_opening_sill(door, 450.0));
}

#[test]
fn test_drag_keeps_opening_on_the_rail() {
    let (mut plan, wall) = plan_with_wall(2000.0);
    let door = plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 0.0)
        .expect("door");

    let p = plan.drag_opening(door, Point::new(700.0, 350.0)).expect("hosted");
    assert_eq!(p, Point::new(700.0, 0.0));

    // dragging past the end stops with the opening flush
    let p = plan.drag_opening(door, Point::new(5000.0, -80.0)).expect("hosted");
    assert_eq!(p, Point::new(1100.0, 0.0));
}
