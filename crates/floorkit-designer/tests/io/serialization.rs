use floorkit_core::{DocumentError, Error};
use floorkit_designer::{Blueprint, FloorPlan, OpeningStyle, PlanDocument, Point, Wall};
use tempfile::TempDir;

fn sample_plan() -> FloorPlan {
    let mut plan = FloorPlan::new();
    let a = plan.add_wall(Wall::new(Point::new(0.0, 0.0), Point::new(4000.0, 0.0), 200.0, 2600.0));
    let b = plan.add_wall(Wall::new(
        Point::new(4000.0, 0.0),
        Point::new(4000.0, 3000.0),
        120.0,
        2600.0,
    ));
    plan.add_opening(OpeningStyle::DoubleDoor, 1400.0, 2100.0, 0.0, &a, 1300.0);
    let window = plan
        .add_opening(OpeningStyle::BayWindow, 1800.0, 1200.0, 800.0, &b, 600.0)
        .expect("window");
    plan.toggle_opening_flip(window);
    plan
}

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.fkplan");
    let plan = sample_plan();
    let mut blueprint = Blueprint::new("/plans/ground-floor.png", 2000, 1500);
    blueprint.set_scale(2.5);
    blueprint.set_opacity(0.4);

    PlanDocument::from_scene(&plan, Some(&blueprint))
        .save_to_file(&path)
        .unwrap();
    let (loaded, loaded_bp) = PlanDocument::load_from_file(&path)
        .unwrap()
        .to_scene()
        .unwrap();

    assert_eq!(loaded.wall_count(), 2);
    for wall in plan.walls() {
        let other = loaded.wall(wall.id()).expect("wall id preserved");
        assert_eq!(other.start(), wall.start());
        assert_eq!(other.end(), wall.end());
        assert_eq!(other.thickness(), wall.thickness());
        assert_eq!(other.outline(), wall.outline());
        assert_eq!(loaded.openings_on(wall.id()).count(), 1);
    }

    let window = loaded
        .openings()
        .iter()
        .find(|o| o.style() == OpeningStyle::BayWindow)
        .expect("window");
    assert_eq!(window.distance_from_start(), 600.0);
    assert_eq!(window.sill_height(), 800.0);
    assert!(window.is_flipped());
    assert!(window.is_visible());

    let bp = loaded_bp.expect("blueprint");
    assert_eq!(bp.pixel_size(), (2000, 1500));
    assert_eq!(bp.scale(), 2.5);
    assert_eq!(bp.opacity(), 0.4);
}

#[test]
fn test_plan_without_blueprint() {
    let doc = PlanDocument::from_scene(&sample_plan(), None);
    assert!(doc.settings.background_image.is_empty());
    let (_, bp) = doc.to_scene().unwrap();
    assert!(bp.is_none());
}

#[test]
fn test_opening_on_unknown_wall_is_skipped() {
    let json = r#"{
        "project_info": { "version": "1.0", "created_at": "2024-03-01T10:00:00Z" },
        "walls": [
            { "id": "w-1", "start": [0, 0], "end": [3000, 0], "thickness": 150, "height": 2500 }
        ],
        "openings": [
            { "wall_id": "w-1", "kind": "door", "style": "single", "width": 900, "height": 2100,
              "distance_from_start": 200 },
            { "wall_id": "w-9", "kind": "window", "style": "casement", "width": 1000,
              "height": 1000, "sill": 900 }
        ]
    }"#;
    let (plan, _) = PlanDocument::from_json(json).unwrap().to_scene().unwrap();
    assert_eq!(plan.openings().len(), 1);
    assert_eq!(plan.openings()[0].distance_from_start(), 200.0);
    assert!(plan.openings()[0].wall().is_some_and(|w| w.as_str() == "w-1"));
}

#[test]
fn test_missing_fields_take_defaults() {
    let json = r#"{
        "project_info": { "version": "1.0", "created_at": "2024-03-01T10:00:00Z" },
        "walls": [ { "start": [0, 0], "end": [1000, 0] } ]
    }"#;
    let (plan, bp) = PlanDocument::from_json(json).unwrap().to_scene().unwrap();
    let wall = plan.walls().next().expect("wall");
    assert_eq!(wall.thickness(), 30.0);
    assert_eq!(wall.height(), 200.0);
    assert!(!wall.id().as_str().is_empty());
    assert!(bp.is_none());
}

#[test]
fn test_unknown_kind_fails_the_load() {
    let json = r#"{
        "project_info": { "version": "1.0", "created_at": "2024-03-01T10:00:00Z" },
        "walls": [ { "id": "w-1", "start": [0, 0], "end": [1000, 0] } ],
        "openings": [
            { "wall_id": "w-1", "kind": "skylight", "style": "single", "width": 500, "height": 500 }
        ]
    }"#;
    let err = PlanDocument::from_json(json).unwrap().to_scene().unwrap_err();
    assert!(matches!(
        err,
        Error::Document(DocumentError::UnknownKind { .. })
    ));
}

#[test]
fn test_corrupt_file_reports_parse_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.fkplan");
    std::fs::write(&path, "{ not json").unwrap();
    let err = PlanDocument::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse plan file"));
}
