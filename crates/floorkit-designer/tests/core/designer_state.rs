use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use floorkit_core::{AppEvent, EventCategory, EventFilter, InteractionMode, ProjectEvent};
use floorkit_designer::{DesignerState, Modifiers, MouseButton, Point};
use tempfile::TempDir;

fn draw_l(state: &mut DesignerState) {
    let surface = &mut state.surface;
    surface.set_mode(InteractionMode::DrawWall);
    surface.mouse_press(Point::new(0.0, 0.0), MouseButton::Left, Modifiers::NONE);
    surface.mouse_press(Point::new(3000.0, 0.0), MouseButton::Left, Modifiers::NONE);
    surface.mouse_press(Point::new(3000.0, 2000.0), MouseButton::Right, Modifiers::NONE);
    surface.set_mode(InteractionMode::Select);
}

#[test]
fn test_new_state_is_clean() {
    let state = DesignerState::new();
    assert!(!state.is_modified());
    assert_eq!(state.display_name(), "Untitled");
    assert!(state.current_file_path.is_none());
}

#[test]
fn test_drawing_marks_state_dirty() {
    let mut state = DesignerState::new();
    draw_l(&mut state);
    assert_eq!(state.surface.plan().wall_count(), 2);
    assert!(state.is_modified());
    assert_eq!(state.display_name(), "Untitled*");
}

#[test]
fn test_save_appends_extension_and_clears_dirty() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    draw_l(&mut state);

    let written = state.save_to_file(dir.path().join("house")).unwrap();
    assert_eq!(written, dir.path().join("house.fkplan"));
    assert!(written.exists());
    assert!(!state.is_modified());
    assert_eq!(state.display_name(), "house.fkplan");
    assert_eq!(state.recent_files().first(), Some(&written));
}

#[test]
fn test_save_without_path_fails() {
    let mut state = DesignerState::new();
    assert!(state.save().is_err());
}

#[test]
fn test_load_restores_walls_and_name() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    draw_l(&mut state);
    let path = state.save_to_file(dir.path().join("studio.fkplan")).unwrap();

    let mut other = DesignerState::new();
    other.load_from_file(&path).unwrap();
    assert_eq!(other.design_name, "studio");
    assert_eq!(other.surface.plan().wall_count(), 2);
    assert_eq!(other.created_at(), state.created_at());
    assert!(!other.is_modified());
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    let err = state
        .load_from_file(dir.path().join("nope.fkplan"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("nope.fkplan"));
}

#[test]
fn test_new_design_clears_everything() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    draw_l(&mut state);
    state.save_to_file(dir.path().join("a")).unwrap();

    state.new_design();
    assert!(state.surface.plan().is_empty());
    assert!(state.current_file_path.is_none());
    assert!(!state.is_modified());
    // recent files survive a new design
    assert_eq!(state.recent_files().len(), 1);
}

#[test]
fn test_autosave_next_to_project_file() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    draw_l(&mut state);
    state.save_to_file(dir.path().join("flat")).unwrap();

    assert_eq!(
        state.autosave_path(),
        Some(dir.path().join("flat.autosave.fkplan"))
    );

    // unmodified projects are not autosaved
    assert!(!state.autosave_due(Utc::now()));
    state.surface.apply_wall_height_to_all_walls(2600.0);
    assert!(state.autosave_due(Utc::now()));

    let written = state.save_autosave().unwrap();
    assert!(state.has_autosave());
    assert!(state.is_modified());
    assert!(!state.autosave_due(Utc::now()));
    assert!(state.autosave_due(Utc::now() + Duration::seconds(121)));

    state.remove_autosave().unwrap();
    assert!(!written.exists());
}

#[test]
fn test_autosave_disabled_in_config() {
    let mut state = DesignerState::new();
    state.config.project.autosave_enabled = false;
    draw_l(&mut state);
    assert!(!state.autosave_due(Utc::now()));
}

#[test]
fn test_dirty_flag_is_published_once_per_flip() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    state.surface.event_bus().subscribe(
        EventFilter::only(EventCategory::Project),
        move |event| {
            if let AppEvent::Project(ProjectEvent::DirtyChanged { dirty }) = event {
                sink.lock().unwrap().push(*dirty);
            }
        },
    );

    draw_l(&mut state);
    state.refresh_modified();
    state.refresh_modified();
    state.save_to_file(dir.path().join("b")).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}
