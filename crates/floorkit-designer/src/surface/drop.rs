//! Drag-and-drop placement of doors and windows from the palette.
//!
//! While a payload hovers the scene, a preview opening follows the nearest
//! wall and that wall is highlighted. Dropping commits the preview onto the
//! wall; dropping away from every wall discards it.

use super::{DesignSurface, EventResult, Selection};
use crate::catalog::OpeningPreset;
use crate::geometry::Point;
use crate::opening::{Opening, OpeningId};
use crate::wall::WallId;

#[derive(Debug, Clone)]
pub(super) struct DropPreview {
    payload: String,
    opening: Opening,
    wall: Option<WallId>,
}

impl DesignSurface {
    /// The opening being previewed, if any
    pub fn drop_preview(&self) -> Option<&Opening> {
        self.preview.as_ref().map(|p| &p.opening)
    }

    /// Payload entered or moved over the scene
    pub fn drag_move(&mut self, payload: &str, pos: Point) -> EventResult {
        let stale = self.preview.as_ref().is_none_or(|p| p.payload != payload);
        if stale {
            let preset = match OpeningPreset::from_payload(payload) {
                Ok(preset) => preset,
                Err(e) => {
                    tracing::debug!("Ignoring drag payload: {}", e);
                    self.clear_drop_preview();
                    return EventResult::Ignored;
                }
            };
            let mut opening =
                self.plan
                    .new_opening(preset.style, preset.width, preset.height, preset.sill);
            opening.set_preview(true);
            self.preview = Some(DropPreview {
                payload: payload.to_string(),
                opening,
                wall: None,
            });
        }

        self.update_drop_preview(pos);
        EventResult::Handled
    }

    /// Payload left the scene
    pub fn drag_leave(&mut self) {
        self.clear_drop_preview();
    }

    /// Drop a payload at `pos`. Returns the new opening, or `None` when no
    /// wall was close enough.
    pub fn drop_payload(&mut self, payload: &str, pos: Point) -> Option<OpeningId> {
        if !self.drag_move(payload, pos).is_handled() {
            return None;
        }
        let preview = self.preview.take()?;
        self.plan.clear_highlights();

        let Some(wall) = preview.wall else {
            tracing::debug!("Dropped {} away from any wall", preview.opening.style().label());
            return None;
        };
        let distance = preview.opening.distance_from_start();
        let id = self.plan.insert_opening(preview.opening, &wall, distance)?;

        tracing::info!("Placed {} on wall {} at {:.1} mm", id, wall, distance);
        self.selection = Some(Selection::Opening(id));
        self.content_changed();
        Some(id)
    }

    pub(super) fn clear_drop_preview(&mut self) {
        if self.preview.take().is_some() {
            self.plan.clear_highlights();
        }
    }

    fn update_drop_preview(&mut self, pos: Point) {
        self.plan.clear_highlights();

        let hit = {
            let busy = self.busy_walls();
            self.plan.find_wall_near(pos, self.drop_search_radius, &busy)
        };
        let snap_distance = self.drop_snap_distance;

        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        // a wall shorter than the opening cannot host it
        let width = preview.opening.width();
        let host = hit
            .as_ref()
            .and_then(|h| self.plan.wall(&h.wall))
            .filter(|w| width <= w.length());
        match (hit.as_ref(), host) {
            (Some(hit), Some(wall)) => {
                let center = snap_center(hit.along, wall.length(), snap_distance);
                preview.opening.set_wall(Some(wall));
                preview
                    .opening
                    .set_distance_from_start(center - width / 2.0, Some(wall));
                preview.wall = Some(hit.wall.clone());
            }
            _ => {
                preview.opening.set_wall(None);
                preview.wall = None;
            }
        }

        if let Some(wall) = preview.wall.clone() {
            self.plan.set_wall_highlighted(&wall, true);
        }
    }
}

/// Snap an along-wall center distance to the wall's start, middle or end
fn snap_center(along: f64, length: f64, snap_distance: f64) -> f64 {
    [0.0, length / 2.0, length]
        .into_iter()
        .find(|target| (along - target).abs() < snap_distance)
        .unwrap_or(along)
}
