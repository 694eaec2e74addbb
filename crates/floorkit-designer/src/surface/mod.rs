//! Design surface: the interactive scene.
//!
//! Owns the floor plan and every piece of transient interaction state, and
//! turns pointer and keyboard events into plan edits according to the
//! current [`InteractionMode`]. Mode changes only happen through
//! [`DesignSurface::set_mode`]; event handlers never switch modes on their
//! own, with the single exception of a successful calibration returning
//! to Select.
//!
//! Every geometry-affecting mutation bumps [`DesignSurface::revision`] and
//! publishes [`SceneEvent::ContentChanged`] on the surface's event bus.

mod calibrate;
mod draw_wall;
mod drop;
mod input;
mod select;

pub use calibrate::CalibrationLine;
pub use draw_wall::LengthIndicator;
pub use input::{EventResult, Key, Modifiers, MouseButton};

use std::sync::Arc;

use floorkit_core::constants::{
    DEFAULT_WALL_HEIGHT, DEFAULT_WALL_THICKNESS, DROP_SEARCH_RADIUS, DROP_SNAP_DISTANCE,
};
use floorkit_core::{AppEvent, EventBus, InteractionMode, SceneEvent};
use floorkit_settings::Config;

use crate::blueprint::Blueprint;
use crate::catalog::OpeningCatalog;
use crate::geometry::Point;
use crate::opening::OpeningId;
use crate::plan::{FloorPlan, WallEnd};
use crate::snapping::{self, SnapParams, SnapResult};
use crate::wall::WallId;

use calibrate::Calibration;
use drop::DropPreview;

/// What the user last picked
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Wall(WallId),
    Opening(OpeningId),
}

/// Endpoint being dragged by its edit handle
#[derive(Debug, Clone)]
struct EndpointEdit {
    wall: WallId,
    end: WallEnd,
}

#[derive(Debug, Clone)]
enum Drag {
    /// Whole-wall translate; offsets are measured from the press point
    Wall {
        wall: WallId,
        grab: Point,
        origin: Point,
    },
    /// Opening sliding along its wall
    Opening { opening: OpeningId, grab_offset: Point },
}

pub struct DesignSurface {
    plan: FloorPlan,
    catalog: OpeningCatalog,
    mode: InteractionMode,
    bus: Arc<EventBus>,

    snap: SnapParams,
    wall_thickness: f64,
    wall_height: f64,
    drop_search_radius: f64,
    drop_snap_distance: f64,

    active_wall: Option<WallId>,
    edit: Option<EndpointEdit>,
    drag: Option<Drag>,
    length_buffer: String,
    last_direction: Point,
    last_mouse: Point,
    snap_indicator: Option<Point>,
    calibration: Calibration,
    blueprint: Option<Blueprint>,
    preview: Option<DropPreview>,
    selection: Option<Selection>,
    revision: u64,
}

impl Default for DesignSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignSurface {
    /// Surface publishing onto a private event bus
    pub fn new() -> Self {
        Self::with_event_bus(Arc::new(EventBus::new()))
    }

    pub fn with_event_bus(bus: Arc<EventBus>) -> Self {
        Self {
            plan: FloorPlan::new(),
            catalog: OpeningCatalog::builtin(),
            mode: InteractionMode::Select,
            bus,
            snap: SnapParams::default(),
            wall_thickness: DEFAULT_WALL_THICKNESS,
            wall_height: DEFAULT_WALL_HEIGHT,
            drop_search_radius: DROP_SEARCH_RADIUS,
            drop_snap_distance: DROP_SNAP_DISTANCE,
            active_wall: None,
            edit: None,
            drag: None,
            length_buffer: String::new(),
            last_direction: Point::new(1.0, 0.0),
            last_mouse: Point::ZERO,
            snap_indicator: None,
            calibration: Calibration::default(),
            blueprint: None,
            preview: None,
            selection: None,
            revision: 0,
        }
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn catalog(&self) -> &OpeningCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut OpeningCatalog {
        &mut self.catalog
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Bumped on every content change; used for dirty tracking
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Wall currently being drawn
    pub fn active_wall(&self) -> Option<&WallId> {
        self.active_wall.as_ref()
    }

    /// Where the snap indicator is shown, if a snap is in effect
    pub fn snap_indicator(&self) -> Option<Point> {
        self.snap_indicator
    }

    pub fn snap_params(&self) -> &SnapParams {
        &self.snap
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap.enabled = enabled;
    }

    pub fn set_grid_snap_enabled(&mut self, enabled: bool) {
        self.snap.grid_enabled = enabled;
    }

    pub fn set_snap_tolerance(&mut self, tolerance: f64) -> bool {
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return false;
        }
        self.snap.tolerance = tolerance;
        true
    }

    pub fn set_grid_size(&mut self, grid_size: f64) -> bool {
        if !(grid_size > 0.0 && grid_size.is_finite()) {
            return false;
        }
        self.snap.grid_size = grid_size;
        true
    }

    pub fn wall_defaults(&self) -> (f64, f64) {
        (self.wall_thickness, self.wall_height)
    }

    /// Thickness and height for walls drawn from now on
    pub fn set_wall_defaults(&mut self, thickness: f64, height: f64) -> bool {
        let valid = |v: f64| v > 0.0 && v.is_finite();
        if !valid(thickness) || !valid(height) {
            return false;
        }
        self.wall_thickness = thickness;
        self.wall_height = height;
        true
    }

    /// Push editor configuration into the surface
    pub fn apply_config(&mut self, config: &Config) {
        self.snap = SnapParams::from(&config.snapping);
        self.set_wall_defaults(config.walls.thickness, config.walls.height);
        self.drop_search_radius = config.openings.drop_search_radius;
        self.drop_snap_distance = config.openings.drop_snap_distance;
        if (self.plan.joint_tolerance() - config.snapping.joint_tolerance).abs() > f64::EPSILON
            && self.plan.set_joint_tolerance(config.snapping.joint_tolerance)
        {
            self.content_changed();
        }
        tracing::debug!("Applied editor configuration to design surface");
    }

    /// Switch interaction mode, tearing down the state of the mode being
    /// left.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }

        self.clear_drop_preview();
        match self.mode {
            InteractionMode::DrawWall => self.finalize_wall(None),
            InteractionMode::Calibrate => self.reset_calibration(),
            InteractionMode::Select => {}
        }

        self.edit = None;
        self.drag = None;
        self.length_buffer.clear();
        self.snap_indicator = None;

        tracing::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.bus
            .publish(AppEvent::Scene(SceneEvent::ModeChanged(mode)));
    }

    pub fn mouse_press(
        &mut self,
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> EventResult {
        self.last_mouse = pos;
        match self.mode {
            InteractionMode::Select => self.select_press(pos, button),
            InteractionMode::DrawWall => self.draw_wall_press(pos, button, modifiers),
            InteractionMode::Calibrate => self.calibrate_press(pos, button),
        }
    }

    pub fn mouse_move(&mut self, pos: Point, modifiers: Modifiers) -> EventResult {
        self.last_mouse = pos;
        match self.mode {
            InteractionMode::Select => self.select_move(pos, modifiers),
            InteractionMode::DrawWall => self.draw_wall_move(pos, modifiers),
            InteractionMode::Calibrate => self.calibrate_move(pos),
        }
    }

    pub fn mouse_release(&mut self, pos: Point, button: MouseButton) -> EventResult {
        self.last_mouse = pos;
        match self.mode {
            InteractionMode::Select => self.select_release(button),
            InteractionMode::DrawWall | InteractionMode::Calibrate => EventResult::Ignored,
        }
    }

    pub fn key_press(&mut self, key: Key) -> EventResult {
        match self.mode {
            InteractionMode::Select => self.select_key(key),
            InteractionMode::DrawWall => self.draw_wall_key(key),
            InteractionMode::Calibrate => EventResult::Ignored,
        }
    }

    /// Set every wall's height and make it the default for new walls
    pub fn apply_wall_height_to_all_walls(&mut self, height: f64) -> bool {
        if !self.plan.set_all_wall_heights(height) {
            return false;
        }
        self.wall_height = height;
        self.content_changed();
        true
    }

    pub fn set_wall_thickness(&mut self, wall: &WallId, thickness: f64) -> bool {
        let changed = self.plan.set_wall_thickness(wall, thickness);
        self.changed_if(changed)
    }

    pub fn set_wall_height(&mut self, wall: &WallId, height: f64) -> bool {
        let changed = self.plan.set_wall_height(wall, height);
        self.changed_if(changed)
    }

    pub fn set_wall_angle(&mut self, wall: &WallId, degrees: f64) -> bool {
        let changed = self.plan.set_wall_angle(wall, degrees);
        self.changed_if(changed)
    }

    pub fn set_wall_endpoints(&mut self, wall: &WallId, start: Point, end: Point) -> bool {
        let changed = self.plan.set_wall_endpoints(wall, start, end);
        self.changed_if(changed)
    }

    pub fn set_opening_distance(&mut self, opening: OpeningId, distance: f64) -> bool {
        let changed = self.plan.set_opening_distance(opening, distance);
        self.changed_if(changed)
    }

    pub fn set_opening_width(&mut self, opening: OpeningId, width: f64) -> bool {
        let changed = self.plan.set_opening_width(opening, width);
        self.changed_if(changed)
    }

    pub fn set_opening_height(&mut self, opening: OpeningId, height: f64) -> bool {
        let changed = self.plan.set_opening_height(opening, height);
        self.changed_if(changed)
    }

    pub fn set_opening_sill(&mut self, opening: OpeningId, sill: f64) -> bool {
        let changed = self.plan.set_opening_sill(opening, sill);
        self.changed_if(changed)
    }

    pub fn toggle_opening_flip(&mut self, opening: OpeningId) -> bool {
        let changed = self.plan.toggle_opening_flip(opening);
        self.changed_if(changed)
    }

    /// Delete a wall and every opening it hosts
    pub fn delete_wall(&mut self, wall: &WallId) -> bool {
        if self.active_wall.as_ref() == Some(wall) {
            self.active_wall = None;
        }
        if self.edit.as_ref().is_some_and(|e| &e.wall == wall) {
            self.edit = None;
        }
        if matches!(&self.drag, Some(Drag::Wall { wall: w, .. }) if w == wall) {
            self.drag = None;
        }
        if self.plan.remove_wall(wall).is_none() {
            return false;
        }
        self.prune_selection();
        self.content_changed();
        true
    }

    pub fn delete_opening(&mut self, opening: OpeningId) -> bool {
        if self.plan.remove_opening(opening).is_none() {
            return false;
        }
        if matches!(&self.drag, Some(Drag::Opening { opening: o, .. }) if *o == opening) {
            self.drag = None;
        }
        self.prune_selection();
        self.content_changed();
        true
    }

    /// Delete whatever is selected
    pub fn delete_selection(&mut self) -> bool {
        match self.selection.clone() {
            Some(Selection::Wall(wall)) => self.delete_wall(&wall),
            Some(Selection::Opening(opening)) => self.delete_opening(opening),
            None => false,
        }
    }

    /// Empty the scene and drop all interaction state. The mode is kept.
    pub fn reset(&mut self) {
        self.clear_state();
        tracing::info!("Design surface reset");
        self.content_changed();
    }

    /// Replace the whole scene, e.g. after loading a document
    pub fn replace_content(&mut self, plan: FloorPlan, blueprint: Option<Blueprint>) {
        self.clear_state();
        self.plan = plan;
        self.blueprint = blueprint;
        tracing::debug!("Design surface content replaced ({} walls)", self.plan.wall_count());
        self.content_changed();
    }

    fn clear_state(&mut self) {
        self.plan.clear();
        self.blueprint = None;
        self.active_wall = None;
        self.edit = None;
        self.drag = None;
        self.preview = None;
        self.selection = None;
        self.length_buffer.clear();
        self.snap_indicator = None;
        self.calibration = Calibration::default();
        self.last_direction = Point::new(1.0, 0.0);
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.blueprint.as_ref()
    }

    pub fn has_blueprint(&self) -> bool {
        self.blueprint.is_some()
    }

    pub fn set_blueprint(&mut self, blueprint: Option<Blueprint>) {
        if let Some(bp) = &blueprint {
            tracing::info!("Blueprint set to {}", bp.path().display());
        }
        self.blueprint = blueprint;
        self.reset_calibration();
        self.content_changed();
    }

    pub fn set_blueprint_opacity(&mut self, opacity: f64) {
        if let Some(bp) = self.blueprint.as_mut() {
            bp.set_opacity(opacity);
            self.content_changed();
        }
    }

    /// Run the constraint pipeline: axis lock against `anchor` when
    /// `orthogonal` is set, then snapping against every wall that is not
    /// being drawn, edited or dragged.
    fn constrain(&self, raw: Point, anchor: Option<Point>, orthogonal: bool) -> SnapResult {
        let pos = match anchor {
            Some(anchor) if orthogonal => snapping::orthogonal(raw, anchor),
            _ => raw,
        };
        let busy = self.busy_walls();
        let candidates = self.plan.walls().filter(|w| !busy.contains(&w.id()));
        snapping::snap(pos, candidates, &self.snap)
    }

    /// Take a constraint result, updating the snap indicator
    fn accept(&mut self, result: SnapResult) -> Point {
        self.snap_indicator = result.is_snapped().then_some(result.point);
        result.point
    }

    /// Walls excluded from snapping and drop targeting
    fn busy_walls(&self) -> Vec<&WallId> {
        let mut busy = Vec::with_capacity(2);
        if let Some(id) = &self.active_wall {
            busy.push(id);
        }
        if let Some(edit) = &self.edit {
            busy.push(&edit.wall);
        }
        if let Some(Drag::Wall { wall, .. }) = &self.drag {
            busy.push(wall);
        }
        busy
    }

    fn prune_selection(&mut self) {
        let stale = match &self.selection {
            Some(Selection::Wall(id)) => self.plan.wall(id).is_none(),
            Some(Selection::Opening(id)) => self.plan.opening(*id).is_none(),
            None => false,
        };
        if stale {
            self.selection = None;
        }
    }

    fn changed_if(&mut self, changed: bool) -> bool {
        if changed {
            self.content_changed();
        }
        changed
    }

    fn content_changed(&mut self) {
        self.revision += 1;
        self.bus
            .publish(AppEvent::Scene(SceneEvent::ContentChanged));
    }
}
