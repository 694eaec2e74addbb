use std::sync::Arc;

use floorkit_core::{AppEvent, BusOptions, EventBus, EventCategory, EventFilter, SceneEvent};
use floorkit_designer::{DesignSurface, FloorPlan, Modifiers, MouseButton, Point};

/// Surface on a bus that keeps its history
pub fn recording_surface() -> DesignSurface {
    let bus = EventBus::with_options(BusOptions::recording(1000));
    DesignSurface::with_event_bus(Arc::new(bus))
}

pub fn scene_events(surface: &DesignSurface) -> Vec<SceneEvent> {
    surface
        .event_bus()
        .history_matching(&EventFilter::only(EventCategory::Scene))
        .into_iter()
        .filter_map(|e| match e {
            AppEvent::Scene(e) => Some(e),
            _ => None,
        })
        .collect()
}

pub fn surface_with(plan: FloorPlan) -> DesignSurface {
    let mut surface = recording_surface();
    surface.replace_content(plan, None);
    surface
}

pub fn click(surface: &mut DesignSurface, x: f64, y: f64) {
    surface.mouse_press(Point::new(x, y), MouseButton::Left, Modifiers::NONE);
}

pub fn drag(surface: &mut DesignSurface, from: Point, to: Point) {
    surface.mouse_press(from, MouseButton::Left, Modifiers::NONE);
    surface.mouse_move(to, Modifiers::NONE);
    surface.mouse_release(to, MouseButton::Left);
}
