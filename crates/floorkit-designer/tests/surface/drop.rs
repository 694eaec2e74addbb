use floorkit_designer::{
    DesignSurface, FloorPlan, OpeningPreset, OpeningStyle, Point, Selection, Wall, WallId,
};

use crate::support::surface_with;

fn scene() -> (DesignSurface, WallId) {
    let mut plan = FloorPlan::new();
    let wall = plan.add_wall(Wall::new(Point::new(0.0, 0.0), Point::new(3000.0, 0.0), 200.0, 2400.0));
    (surface_with(plan), wall)
}

fn door_payload() -> String {
    OpeningPreset::new(OpeningStyle::SingleDoor, 900.0, 2100.0, 0.0)
        .to_payload()
        .unwrap()
}

#[test]
fn test_hover_previews_on_nearest_wall() {
    let (mut surface, wall) = scene();
    let payload = door_payload();

    assert!(surface.drag_move(&payload, Point::new(700.0, 30.0)).is_handled());
    let preview = surface.drop_preview().expect("preview");
    assert!(preview.is_preview());
    assert_eq!(preview.wall(), Some(&wall));
    assert_eq!(preview.distance_from_start(), 250.0);
    assert!(surface.plan().wall(&wall).is_some_and(|w| w.is_highlighted()));

    // moving away unhooks the preview and the highlight
    surface.drag_move(&payload, Point::new(700.0, 600.0));
    assert!(surface.drop_preview().is_some_and(|p| p.wall().is_none()));
    assert!(surface.plan().wall(&wall).is_some_and(|w| !w.is_highlighted()));
}

#[test]
fn test_drop_centers_on_wall_middle() {
    let (mut surface, wall) = scene();
    let revision = surface.revision();

    let id = surface
        .drop_payload(&door_payload(), Point::new(1460.0, -25.0))
        .expect("placed");
    let door = surface.plan().opening(id).expect("door");
    assert_eq!(door.distance_from_start(), 1050.0);
    assert_eq!(door.wall(), Some(&wall));
    assert!(!door.is_preview());
    assert!(door.is_visible());

    assert_eq!(surface.selection(), Some(&Selection::Opening(id)));
    assert!(surface.drop_preview().is_none());
    assert!(surface.plan().walls().all(|w| !w.is_highlighted()));
    assert!(surface.revision() > revision);
}

#[test]
fn test_drop_near_wall_end_stays_flush() {
    let (mut surface, _) = scene();
    let id = surface
        .drop_payload(&door_payload(), Point::new(2950.0, 10.0))
        .expect("placed");
    assert_eq!(
        surface.plan().opening(id).map(|o| o.distance_from_start()),
        Some(2100.0)
    );
}

#[test]
fn test_drop_away_from_walls_is_rejected() {
    let (mut surface, _) = scene();
    assert!(surface
        .drop_payload(&door_payload(), Point::new(1500.0, 400.0))
        .is_none());
    assert!(surface.plan().openings().is_empty());
    assert!(surface.drop_preview().is_none());
}

#[test]
fn test_drop_on_wall_shorter_than_opening_is_rejected() {
    let (mut surface, _) = scene();
    let mut plan = surface.plan().clone();
    let short = plan.add_wall(Wall::new(
        Point::new(0.0, 2000.0),
        Point::new(500.0, 2000.0),
        200.0,
        2400.0,
    ));
    surface.replace_content(plan, None);
    let payload = door_payload();
    let openings = surface.plan().openings().len();
    let revision = surface.revision();

    surface.drag_move(&payload, Point::new(250.0, 2010.0));
    assert!(surface.drop_preview().is_some_and(|p| p.wall().is_none()));
    assert!(surface.plan().wall(&short).is_some_and(|w| !w.is_highlighted()));

    assert!(surface.drop_payload(&payload, Point::new(250.0, 2010.0)).is_none());
    assert_eq!(surface.plan().openings().len(), openings);
    assert_eq!(surface.revision(), revision);
    assert!(surface.selection().is_none());
}

#[test]
fn test_garbage_payload_is_ignored() {
    let (mut surface, _) = scene();
    assert!(!surface.drag_move("{ nope", Point::new(100.0, 0.0)).is_handled());
    assert!(surface.drop_payload("{ nope", Point::new(100.0, 0.0)).is_none());
}

#[test]
fn test_palette_payload_defaults() {
    let (mut surface, _) = scene();
    let id = surface
        .drop_payload(r#"{"kind":"window","style":"porthole"}"#, Point::new(700.0, 0.0))
        .expect("placed");
    let window = surface.plan().opening(id).expect("window");
    assert_eq!(window.style(), OpeningStyle::CasementWindow);
    assert_eq!(window.width(), 900.0);
    assert_eq!(window.height(), 2100.0);
}

#[test]
fn test_drag_leave_clears_preview() {
    let (mut surface, wall) = scene();
    surface.drag_move(&door_payload(), Point::new(700.0, 0.0));
    surface.drag_leave();
    assert!(surface.drop_preview().is_none());
    assert!(surface.plan().wall(&wall).is_some_and(|w| !w.is_highlighted()));
}
