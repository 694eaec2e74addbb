use floorkit_designer::{
    FloorPlan, Key, Modifiers, MouseButton, OpeningId, OpeningStyle, Point, Selection, Wall,
    WallId,
};

use crate::support::{click, drag, surface_with};

fn single_wall() -> (FloorPlan, WallId) {
    let mut plan = FloorPlan::new();
    let id = plan.add_wall(Wall::new(Point::new(0.0, 0.0), Point::new(3000.0, 0.0), 200.0, 2400.0));
    (plan, id)
}

fn wall_with_door() -> (FloorPlan, WallId, OpeningId) {
    let (mut plan, wall) = single_wall();
    let door = plan
        .add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 500.0)
        .expect("door");
    (plan, wall, door)
}

#[test]
fn test_endpoint_handle_moves_only_that_end() {
    let mut plan = FloorPlan::new();
    let a = plan.add_wall(Wall::new(Point::new(0.0, 0.0), Point::new(2000.0, 0.0), 200.0, 2400.0));
    let b = plan.add_wall(Wall::new(
        Point::new(2000.0, 0.0),
        Point::new(2000.0, 1500.0),
        100.0,
        2400.0,
    ));
    let mut surface = surface_with(plan);

    // the shared joint belongs to the earlier wall
    drag(&mut surface, Point::new(2003.0, 2.0), Point::new(2500.0, 7.0));
    assert_eq!(surface.selection(), Some(&Selection::Wall(a.clone())));

    let plan = surface.plan();
    let a = plan.wall(&a).expect("a");
    let b = plan.wall(&b).expect("b");
    assert_eq!(a.start(), Point::new(0.0, 0.0));
    assert_eq!(a.end(), Point::new(2500.0, 0.0));
    assert_eq!(b.start(), Point::new(2000.0, 0.0));
    // the joint is gone so B gets a square end again
    assert!(b.outline()[0].distance_to(&Point::new(1950.0, 0.0)) < 1e-9);
}

#[test]
fn test_wall_body_drag_translates() {
    let (plan, wall) = single_wall();
    let mut surface = surface_with(plan);

    drag(&mut surface, Point::new(1000.0, 50.0), Point::new(1300.0, 450.0));
    let wall = surface.plan().wall(&wall).expect("wall");
    assert_eq!(wall.start(), Point::new(300.0, 400.0));
    assert_eq!(wall.end(), Point::new(3300.0, 400.0));
    assert!(surface.snap_indicator().is_none());
}

#[test]
fn test_wall_drag_snaps_to_other_walls() {
    let (mut plan, wall) = single_wall();
    let other = plan.add_wall(Wall::new(
        Point::new(0.0, 1000.0),
        Point::new(0.0, 3000.0),
        200.0,
        2400.0,
    ));
    let mut surface = surface_with(plan);
    surface.set_grid_snap_enabled(false);

    surface.mouse_press(Point::new(1500.0, 30.0), MouseButton::Left, Modifiers::NONE);
    surface.mouse_move(Point::new(1506.0, 1023.0), Modifiers::NONE);

    let moved = surface.plan().wall(&wall).expect("wall");
    assert_eq!(moved.start(), Point::new(0.0, 1000.0));
    assert_eq!(surface.plan().wall(&other).map(|w| w.start()), Some(Point::new(0.0, 1000.0)));
}

#[test]
fn test_opening_slides_along_its_wall() {
    let (plan, _, door) = wall_with_door();
    let mut surface = surface_with(plan);

    surface.mouse_press(Point::new(800.0, 20.0), MouseButton::Left, Modifiers::NONE);
    assert_eq!(surface.selection(), Some(&Selection::Opening(door)));

    surface.mouse_move(Point::new(1800.0, -60.0), Modifiers::NONE);
    assert_eq!(
        surface.plan().opening(door).map(|o| o.distance_from_start()),
        Some(1500.0)
    );

    surface.mouse_move(Point::new(9000.0, 0.0), Modifiers::NONE);
    assert_eq!(
        surface.plan().opening(door).map(|o| o.distance_from_start()),
        Some(2100.0)
    );
    assert!(surface.mouse_release(Point::new(9000.0, 0.0), MouseButton::Left).is_handled());
}

#[test]
fn test_endpoint_handle_wins_over_opening() {
    let (mut plan, wall) = single_wall();
    plan.add_opening(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0, &wall, 0.0);
    let mut surface = surface_with(plan);

    click(&mut surface, 1.0, 1.0);
    assert_eq!(surface.selection(), Some(&Selection::Wall(wall)));
}

#[test]
fn test_delete_key_removes_selection() {
    let (plan, wall, door) = wall_with_door();
    let mut surface = surface_with(plan);

    drag(&mut surface, Point::new(800.0, 20.0), Point::new(800.0, 20.0));
    assert!(surface.key_press(Key::Delete).is_handled());
    assert!(surface.plan().opening(door).is_none());
    assert!(surface.selection().is_none());

    click(&mut surface, 2000.0, -40.0);
    surface.mouse_release(Point::new(2000.0, -40.0), MouseButton::Left);
    assert_eq!(surface.selection(), Some(&Selection::Wall(wall.clone())));
    assert!(surface.key_press(Key::Delete).is_handled());
    assert!(surface.plan().wall(&wall).is_none());

    assert!(!surface.key_press(Key::Delete).is_handled());
}

#[test]
fn test_empty_click_clears_selection() {
    let (plan, wall) = single_wall();
    let mut surface = surface_with(plan);

    click(&mut surface, 1500.0, 0.0);
    assert_eq!(surface.selection(), Some(&Selection::Wall(wall)));
    surface.mouse_release(Point::new(1500.0, 0.0), MouseButton::Left);

    let result = surface.mouse_press(Point::new(1500.0, 900.0), MouseButton::Left, Modifiers::NONE);
    assert!(!result.is_handled());
    assert!(surface.selection().is_none());
}

#[test]
fn test_deleting_a_wall_drops_its_openings() {
    let (plan, wall, door) = wall_with_door();
    let mut surface = surface_with(plan);
    let before = surface.revision();

    assert!(surface.delete_wall(&wall));
    assert!(surface.plan().opening(door).is_none());
    assert!(surface.revision() > before);
}
