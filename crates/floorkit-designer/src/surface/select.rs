//! Select mode: endpoint handles, whole-wall drags and opening slides.

use floorkit_core::constants::EDIT_HANDLE_MARGIN;

use super::{
    DesignSurface, Drag, EndpointEdit, EventResult, Key, Modifiers, MouseButton, Selection,
};
use crate::geometry::Point;
use crate::plan::WallEnd;

impl DesignSurface {
    /// Press priority: endpoint handle, then opening body, then the topmost
    /// wall body. Anything else falls through to the host.
    pub(super) fn select_press(&mut self, pos: Point, button: MouseButton) -> EventResult {
        if button != MouseButton::Left {
            return EventResult::Ignored;
        }

        let radius = self.snap.tolerance + EDIT_HANDLE_MARGIN;
        if let Some((wall, end)) = self.plan.endpoint_near(pos, radius, &[]) {
            tracing::debug!("Editing {:?} of wall {}", end, wall);
            self.selection = Some(Selection::Wall(wall.clone()));
            self.edit = Some(EndpointEdit { wall, end });
            return EventResult::Handled;
        }

        if let Some(opening) = self.plan.opening_at(pos) {
            let start = self
                .plan
                .opening(opening)
                .and_then(|o| o.placement())
                .map(|p| p.position)
                .unwrap_or(pos);
            self.selection = Some(Selection::Opening(opening));
            self.drag = Some(Drag::Opening {
                opening,
                grab_offset: pos - start,
            });
            return EventResult::Handled;
        }

        if let Some(wall) = self.plan.wall_at(pos).cloned() {
            let origin = self.plan.wall(&wall).map(|w| w.start()).unwrap_or(pos);
            self.selection = Some(Selection::Wall(wall.clone()));
            self.drag = Some(Drag::Wall {
                wall,
                grab: pos,
                origin,
            });
            return EventResult::Handled;
        }

        self.selection = None;
        EventResult::Ignored
    }

    pub(super) fn select_move(&mut self, pos: Point, modifiers: Modifiers) -> EventResult {
        if let Some(edit) = self.edit.clone() {
            let Some(wall) = self.plan.wall(&edit.wall) else {
                self.edit = None;
                return EventResult::Ignored;
            };
            let anchor = match edit.end {
                WallEnd::Start => wall.end(),
                WallEnd::End => wall.start(),
            };
            let result = self.constrain(pos, Some(anchor), modifiers.shift);
            let p = self.accept(result);
            self.plan.set_wall_endpoint(&edit.wall, edit.end, p);
            self.content_changed();
            return EventResult::Handled;
        }

        match self.drag.clone() {
            Some(Drag::Wall { wall, grab, origin }) => {
                let Some(current) = self.plan.wall(&wall).map(|w| w.start()) else {
                    self.drag = None;
                    return EventResult::Ignored;
                };
                // the start point runs through the same pipeline as a drawn endpoint
                let proposed = origin + (pos - grab);
                let result = self.constrain(proposed, Some(origin), modifiers.shift);
                let start = self.accept(result);
                self.plan.translate_wall(&wall, start - current);
                self.content_changed();
                EventResult::Handled
            }
            Some(Drag::Opening {
                opening,
                grab_offset,
            }) => {
                if self.plan.drag_opening(opening, pos - grab_offset).is_some() {
                    self.content_changed();
                }
                EventResult::Handled
            }
            None => EventResult::Ignored,
        }
    }

    pub(super) fn select_release(&mut self, button: MouseButton) -> EventResult {
        if button != MouseButton::Left || (self.edit.is_none() && self.drag.is_none()) {
            return EventResult::Ignored;
        }
        self.edit = None;
        self.drag = None;
        self.snap_indicator = None;
        EventResult::Handled
    }

    pub(super) fn select_key(&mut self, key: Key) -> EventResult {
        match key {
            Key::Delete if self.edit.is_none() && self.drag.is_none() => {
                if self.delete_selection() {
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }
}
