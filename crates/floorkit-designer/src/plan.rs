//! The wall and opening store behind a design surface.
//!
//! `FloorPlan` owns every wall and opening. All wall mutations go through
//! it so that outlines of the touched wall and of the walls sharing its
//! joints are recomputed, and hosted openings re-project onto the new
//! centerline, before the call returns.

use std::collections::HashSet;

use floorkit_core::constants::JOINT_TOLERANCE;

use crate::geometry::{closest_point_on_segment, Point};
use crate::miter;
use crate::opening::{Opening, OpeningId, OpeningStyle};
use crate::wall::{Wall, WallId};

/// One end of a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

/// Nearest-point query result against a wall centerline
#[derive(Debug, Clone, PartialEq)]
pub struct WallHit {
    pub wall: WallId,
    /// Closest point on the centerline
    pub point: Point,
    /// Arc length of `point` from the wall start
    pub along: f64,
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub struct FloorPlan {
    walls: Vec<Wall>,
    openings: Vec<Opening>,
    next_opening_id: u64,
    joint_tolerance: f64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlan {
    pub fn new() -> Self {
        Self {
            walls: Vec::new(),
            openings: Vec::new(),
            next_opening_id: 1,
            joint_tolerance: JOINT_TOLERANCE,
        }
    }

    pub fn joint_tolerance(&self) -> f64 {
        self.joint_tolerance
    }

    /// Change the joint tolerance and rebuild every outline
    pub fn set_joint_tolerance(&mut self, tolerance: f64) -> bool {
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return false;
        }
        self.joint_tolerance = tolerance;
        self.rebuild_all();
        true
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.openings.is_empty()
    }

    /// Every wall in insertion order, degenerate ones included
    pub fn all_walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Walls usable for geometry queries (degenerate walls excluded)
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(|w| !w.is_degenerate())
    }

    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    pub fn wall(&self, id: &WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id() == id)
    }

    fn wall_index(&self, id: &WallId) -> Option<usize> {
        self.walls.iter().position(|w| w.id() == id)
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id() == id)
    }

    /// Openings hosted by `wall`, in attachment order
    pub fn openings_on<'a>(&'a self, wall: &WallId) -> impl Iterator<Item = &'a Opening> + 'a {
        self.wall(wall)
            .map(|w| w.openings())
            .unwrap_or_default()
            .iter()
            .filter_map(move |id| self.opening(*id))
    }

    /// Add a wall and build its outline along with its neighbors'
    pub fn add_wall(&mut self, wall: Wall) -> WallId {
        let id = wall.id().clone();
        tracing::debug!("Adding wall {} ({:.1} mm)", id, wall.length());
        self.walls.push(wall);
        self.refresh(&id, Vec::new());
        id
    }

    /// Add a wall without touching any geometry. Used while loading, where
    /// outlines are built once every wall and opening is in place.
    pub(crate) fn push_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    /// Remove a wall together with the openings it hosts
    pub fn remove_wall(&mut self, id: &WallId) -> Option<Wall> {
        let index = self.wall_index(id)?;
        let touching = self.touching_ids(index);
        let wall = self.walls.remove(index);

        let before = self.openings.len();
        self.openings.retain(|o| o.wall() != Some(id));
        tracing::debug!(
            "Removed wall {} and {} hosted opening(s)",
            id,
            before - self.openings.len()
        );

        let mut visited = HashSet::new();
        for other in touching {
            if let Some(i) = self.wall_index(&other) {
                self.update_geometry_guarded(i, &mut visited);
            }
        }
        Some(wall)
    }

    pub fn set_wall_start(&mut self, id: &WallId, start: Point) -> bool {
        self.mutate_wall(id, |w| {
            w.set_start(start);
            true
        })
    }

    pub fn set_wall_end(&mut self, id: &WallId, end: Point) -> bool {
        self.mutate_wall(id, |w| {
            w.set_end(end);
            true
        })
    }

    pub fn set_wall_endpoint(&mut self, id: &WallId, which: WallEnd, p: Point) -> bool {
        match which {
            WallEnd::Start => self.set_wall_start(id, p),
            WallEnd::End => self.set_wall_end(id, p),
        }
    }

    pub fn set_wall_endpoints(&mut self, id: &WallId, start: Point, end: Point) -> bool {
        self.mutate_wall(id, |w| {
            w.set_start(start);
            w.set_end(end);
            true
        })
    }

    pub fn translate_wall(&mut self, id: &WallId, delta: Point) -> bool {
        self.mutate_wall(id, |w| {
            w.translate(delta);
            true
        })
    }

    /// Rejects non-positive thickness, leaving the wall unchanged
    pub fn set_wall_thickness(&mut self, id: &WallId, thickness: f64) -> bool {
        self.mutate_wall(id, |w| w.set_thickness(thickness))
    }

    /// Rejects non-positive height. Height does not affect the outline.
    pub fn set_wall_height(&mut self, id: &WallId, height: f64) -> bool {
        match self.wall_index(id) {
            Some(i) => self.walls[i].set_height(height),
            None => false,
        }
    }

    /// Rotate a wall about its start, keeping its length
    pub fn set_wall_angle(&mut self, id: &WallId, degrees: f64) -> bool {
        self.mutate_wall(id, |w| w.set_angle_degrees(degrees))
    }

    /// Set every wall's height. Returns false for an invalid height.
    pub fn set_all_wall_heights(&mut self, height: f64) -> bool {
        if !(height > 0.0 && height.is_finite()) {
            return false;
        }
        for wall in &mut self.walls {
            wall.set_height(height);
        }
        true
    }

    pub fn set_wall_highlighted(&mut self, id: &WallId, highlighted: bool) {
        if let Some(i) = self.wall_index(id) {
            self.walls[i].set_highlighted(highlighted);
        }
    }

    pub fn clear_highlights(&mut self) {
        for wall in &mut self.walls {
            wall.set_highlighted(false);
        }
    }

    /// Recompute the outline of `id`, its joint neighbors and every hosted
    /// opening.
    pub fn update_wall_geometry(&mut self, id: &WallId) {
        if let Some(index) = self.wall_index(id) {
            self.update_geometry_guarded(index, &mut HashSet::new());
        }
    }

    /// Recompute every outline and resync every opening
    pub fn rebuild_all(&mut self) {
        let mut visited = HashSet::new();
        for index in 0..self.walls.len() {
            self.update_geometry_guarded(index, &mut visited);
        }
    }

    /// Allocate an unhosted opening with a fresh id
    pub fn new_opening(
        &mut self,
        style: OpeningStyle,
        width: f64,
        height: f64,
        sill: f64,
    ) -> Opening {
        let id = OpeningId(self.next_opening_id);
        self.next_opening_id += 1;
        Opening::new(id, style, width, height, sill)
    }

    /// Host `opening` on `wall` at `distance` from its start.
    ///
    /// Refused when the wall is unknown or degenerate.
    pub fn insert_opening(
        &mut self,
        mut opening: Opening,
        wall: &WallId,
        distance: f64,
    ) -> Option<OpeningId> {
        let index = self.wall_index(wall)?;
        let host = &self.walls[index];
        if host.is_degenerate() {
            return None;
        }

        let id = opening.id();
        if id.0 >= self.next_opening_id {
            self.next_opening_id = id.0 + 1;
        }
        opening.set_preview(false);
        opening.set_wall(Some(host));
        opening.set_distance_from_start(distance, Some(host));

        self.walls[index].attach_opening(id);
        self.openings.push(opening);
        Some(id)
    }

    /// Create and host a new opening. Refused when it is wider than the wall.
    pub fn add_opening(
        &mut self,
        style: OpeningStyle,
        width: f64,
        height: f64,
        sill: f64,
        wall: &WallId,
        distance: f64,
    ) -> Option<OpeningId> {
        if self.wall(wall).is_none_or(|w| width > w.length()) {
            return None;
        }
        let opening = self.new_opening(style, width, height, sill);
        self.insert_opening(opening, wall, distance)
    }

    pub fn remove_opening(&mut self, id: OpeningId) -> Option<Opening> {
        let index = self.openings.iter().position(|o| o.id() == id)?;
        let opening = self.openings.remove(index);
        if let Some(host) = opening.wall().and_then(|w| self.wall_index(w)) {
            self.walls[host].detach_opening(id);
        }
        Some(opening)
    }

    /// Run `f` on an opening with its host wall
    fn with_opening<R>(
        &mut self,
        id: OpeningId,
        f: impl FnOnce(&mut Opening, Option<&Wall>) -> R,
    ) -> Option<R> {
        let opening = self.openings.iter_mut().find(|o| o.id() == id)?;
        let host = opening
            .wall()
            .and_then(|w| self.walls.iter().find(|x| x.id() == w));
        Some(f(opening, host))
    }

    pub fn set_opening_distance(&mut self, id: OpeningId, distance: f64) -> bool {
        self.with_opening(id, |o, host| o.set_distance_from_start(distance, host))
            .unwrap_or(false)
    }

    pub fn set_opening_width(&mut self, id: OpeningId, width: f64) -> bool {
        self.with_opening(id, |o, host| o.set_width(width, host))
            .unwrap_or(false)
    }

    pub fn set_opening_height(&mut self, id: OpeningId, height: f64) -> bool {
        self.with_opening(id, |o, _| o.set_height(height))
            .unwrap_or(false)
    }

    pub fn set_opening_sill(&mut self, id: OpeningId, sill: f64) -> bool {
        self.with_opening(id, |o, _| o.set_sill_height(sill))
            .unwrap_or(false)
    }

    pub fn set_opening_flipped(&mut self, id: OpeningId, flipped: bool) -> bool {
        self.with_opening(id, |o, _| o.set_flipped(flipped)).is_some()
    }

    pub fn toggle_opening_flip(&mut self, id: OpeningId) -> bool {
        self.with_opening(id, |o, _| o.toggle_flip()).is_some()
    }

    /// Slide an opening toward `proposed`; returns its new start point on
    /// the wall, or `None` when the opening has no host.
    pub fn drag_opening(&mut self, id: OpeningId, proposed: Point) -> Option<Point> {
        self.with_opening(id, |o, host| host.map(|w| o.drag_to(proposed, w)))
            .flatten()
    }

    /// Topmost non-degenerate wall whose outline contains `p`
    pub fn wall_at(&self, p: Point) -> Option<&WallId> {
        self.walls
            .iter()
            .rev()
            .filter(|w| !w.is_degenerate())
            .find(|w| w.contains_point(p))
            .map(|w| w.id())
    }

    /// Topmost visible opening whose footprint contains `p`. The footprint
    /// spans the opening width along the wall and the wall thickness across.
    pub fn opening_at(&self, p: Point) -> Option<OpeningId> {
        self.openings.iter().rev().find_map(|o| {
            let placement = o.placement()?;
            let host = o.wall().and_then(|w| self.wall(w))?;
            let local = p - placement.position;
            let u = local.dot(&placement.along);
            let v = placement.along.cross(&local).abs();
            let inside = (0.0..=placement.width).contains(&u) && v <= host.thickness() / 2.0;
            inside.then(|| o.id())
        })
    }

    /// Wall endpoint strictly within `radius` of `p`. The closest wins;
    /// on a tie the earlier wall, and a start before an end.
    pub fn endpoint_near(
        &self,
        p: Point,
        radius: f64,
        exclude: &[&WallId],
    ) -> Option<(WallId, WallEnd)> {
        let mut best_dist = radius;
        let mut best = None;
        for wall in self.walls() {
            if exclude.contains(&wall.id()) {
                continue;
            }
            for (which, q) in [(WallEnd::Start, wall.start()), (WallEnd::End, wall.end())] {
                let dist = p.distance_to(&q);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some((wall.id().clone(), which));
                }
            }
        }
        best
    }

    /// Wall whose centerline passes strictly within `radius` of `p`
    pub fn find_wall_near(&self, p: Point, radius: f64, exclude: &[&WallId]) -> Option<WallHit> {
        let mut best: Option<WallHit> = None;
        for wall in self.walls() {
            if exclude.contains(&wall.id()) {
                continue;
            }
            let (point, t) = closest_point_on_segment(p, wall.start(), wall.end());
            let distance = p.distance_to(&point);
            let limit = best.as_ref().map_or(radius, |b| b.distance);
            if distance < limit {
                best = Some(WallHit {
                    wall: wall.id().clone(),
                    point,
                    along: t * wall.length(),
                    distance,
                });
            }
        }
        best
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.walls.clear();
        self.openings.clear();
        self.next_opening_id = 1;
    }

    /// Apply `f` to a wall, then rebuild it together with every wall that
    /// touched its old or touches its new endpoints.
    fn mutate_wall(&mut self, id: &WallId, f: impl FnOnce(&mut Wall) -> bool) -> bool {
        let Some(index) = self.wall_index(id) else {
            return false;
        };
        let before = self.touching_ids(index);
        if !f(&mut self.walls[index]) {
            tracing::debug!("Rejected edit on wall {}", id);
            return false;
        }
        self.refresh(id, before);
        true
    }

    fn refresh(&mut self, id: &WallId, also: Vec<WallId>) {
        let mut visited = HashSet::new();
        if let Some(index) = self.wall_index(id) {
            self.update_geometry_guarded(index, &mut visited);
        }
        for other in also {
            if let Some(index) = self.wall_index(&other) {
                self.update_geometry_guarded(index, &mut visited);
            }
        }
    }

    fn update_geometry_guarded(&mut self, index: usize, visited: &mut HashSet<WallId>) {
        if !visited.insert(self.walls[index].id().clone()) {
            return;
        }

        let outline = miter::build_outline(&self.walls, index, self.joint_tolerance);
        self.walls[index].set_outline(outline.polygon);
        self.sync_openings(index);

        for neighbor in self.touching_indices(index) {
            self.update_geometry_guarded(neighbor, visited);
        }
    }

    fn sync_openings(&mut self, index: usize) {
        let wall = &self.walls[index];
        for opening in self
            .openings
            .iter_mut()
            .filter(|o| wall.openings().contains(&o.id()))
        {
            opening.sync_with_wall(Some(wall));
        }
    }

    /// Other walls with an endpoint at one of this wall's endpoints
    fn touching_indices(&self, index: usize) -> Vec<usize> {
        let wall = &self.walls[index];
        let tol = self.joint_tolerance;
        let near =
            |p: Point| p.distance_to(&wall.start()) <= tol || p.distance_to(&wall.end()) <= tol;
        self.walls
            .iter()
            .enumerate()
            .filter(|(i, other)| *i != index && (near(other.start()) || near(other.end())))
            .map(|(i, _)| i)
            .collect()
    }

    fn touching_ids(&self, index: usize) -> Vec<WallId> {
        self.touching_indices(index)
            .into_iter()
            .map(|i| self.walls[i].id().clone())
            .collect()
    }
}
