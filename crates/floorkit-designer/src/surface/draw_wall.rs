//! DrawWall mode: click-to-click polyline drawing with typed lengths.

use floorkit_core::constants::{MIN_DIRECTION_LENGTH, MIN_WALL_LENGTH, PROJECTION_EPSILON};
use floorkit_core::units::{is_length_char, parse_typed_length};

use super::{DesignSurface, EventResult, Key, Modifiers, MouseButton};
use crate::geometry::Point;
use crate::snapping;
use crate::wall::{Wall, WallId};

/// Offset of the typed-length label from the cursor
const LENGTH_LABEL_OFFSET: Point = Point { x: 12.0, y: -12.0 };

/// Label shown next to the cursor while a length is being typed
#[derive(Debug, Clone, PartialEq)]
pub struct LengthIndicator {
    pub text: String,
    pub position: Point,
}

impl DesignSurface {
    /// Digits typed so far for the active wall's length
    pub fn length_buffer(&self) -> &str {
        &self.length_buffer
    }

    /// Direction used when a typed length is committed without pointer input
    pub fn last_direction(&self) -> Point {
        self.last_direction
    }

    pub fn length_indicator(&self) -> Option<LengthIndicator> {
        if self.active_wall.is_none() || self.length_buffer.is_empty() {
            return None;
        }
        Some(LengthIndicator {
            text: format!("{} mm", self.length_buffer),
            position: self.last_mouse + LENGTH_LABEL_OFFSET,
        })
    }

    pub(super) fn draw_wall_press(
        &mut self,
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> EventResult {
        match button {
            MouseButton::Left => {
                self.length_buffer.clear();
                match self.active_anchor() {
                    None => {
                        let result = self.constrain(pos, None, false);
                        let start = self.accept(result);
                        self.start_wall(start);
                    }
                    Some((id, anchor)) => {
                        let result = self.constrain(pos, Some(anchor), modifiers.shift);
                        let end = self.accept(result);
                        self.commit_segment(&id, anchor, end);
                    }
                }
                EventResult::Handled
            }
            MouseButton::Right => match self.active_anchor() {
                Some((_, anchor)) => {
                    let result = self.constrain(pos, Some(anchor), modifiers.shift);
                    let end = self.accept(result);
                    self.finalize_wall(Some(end));
                    EventResult::Handled
                }
                None => EventResult::Ignored,
            },
            MouseButton::Middle => EventResult::Ignored,
        }
    }

    pub(super) fn draw_wall_move(&mut self, pos: Point, modifiers: Modifiers) -> EventResult {
        let Some((id, anchor)) = self.active_anchor() else {
            // nothing drawn yet: just track the snap indicator
            let result = self.constrain(pos, None, false);
            self.accept(result);
            return EventResult::Ignored;
        };

        let end = match parse_typed_length(&self.length_buffer) {
            Some(length) => {
                let mut delta = pos - anchor;
                if delta.x.abs() < MIN_DIRECTION_LENGTH && delta.y.abs() < MIN_DIRECTION_LENGTH {
                    delta = self.last_direction;
                }
                if modifiers.shift {
                    delta = snapping::orthogonal_vector(delta);
                }
                let dir = if delta.dot(&delta) < PROJECTION_EPSILON {
                    self.last_direction
                } else {
                    let dir = delta * (1.0 / delta.length());
                    self.last_direction = dir;
                    dir
                };
                self.snap_indicator = None;
                anchor + dir * length
            }
            None => {
                let result = self.constrain(pos, Some(anchor), modifiers.shift);
                let end = self.accept(result);
                if let Some(dir) = direction_of(end - anchor) {
                    self.last_direction = dir;
                }
                end
            }
        };

        self.plan.set_wall_end(&id, end);
        self.content_changed();
        EventResult::Handled
    }

    pub(super) fn draw_wall_key(&mut self, key: Key) -> EventResult {
        let Some((id, anchor)) = self.active_anchor() else {
            return EventResult::Ignored;
        };

        match key {
            Key::Char(c) if is_length_char(c) => {
                self.length_buffer.push(c);
                EventResult::Handled
            }
            Key::Backspace => {
                self.length_buffer.pop();
                EventResult::Handled
            }
            Key::Enter => {
                let buffer = std::mem::take(&mut self.length_buffer);
                if let Some(length) = parse_typed_length(&buffer) {
                    self.snap_indicator = None;
                    let dir =
                        direction_of(self.last_mouse - anchor).unwrap_or(self.last_direction);
                    self.last_direction = dir;
                    tracing::debug!("Typed length {:.1} mm", length);
                    self.commit_segment(&id, anchor, anchor + dir * length);
                }
                EventResult::Handled
            }
            Key::Escape => {
                self.length_buffer.clear();
                EventResult::Handled
            }
            Key::Char(_) | Key::Delete => EventResult::Ignored,
        }
    }

    /// End the wall being drawn, optionally moving its end first. A wall
    /// left degenerate is discarded.
    pub(super) fn finalize_wall(&mut self, end: Option<Point>) {
        self.length_buffer.clear();
        self.snap_indicator = None;

        let Some(id) = self.active_wall.take() else {
            return;
        };
        if let Some(end) = end {
            self.plan.set_wall_end(&id, end);
        }

        if self.plan.wall(&id).is_some_and(|w| w.is_degenerate()) {
            self.plan.remove_wall(&id);
            tracing::debug!("Discarded degenerate wall {}", id);
        } else {
            tracing::info!("Finished wall {}", id);
        }
        self.content_changed();
    }

    /// Close the active segment at `end` and chain the next one from it.
    /// A zero-length segment is not committed.
    fn commit_segment(&mut self, id: &WallId, anchor: Point, end: Point) {
        if end.distance_to(&anchor) < MIN_WALL_LENGTH {
            return;
        }
        self.plan.set_wall_end(id, end);
        tracing::debug!("Committed wall {}", id);
        self.start_wall(end);
    }

    fn start_wall(&mut self, start: Point) {
        let wall = Wall::new(start, start, self.wall_thickness, self.wall_height);
        let id = self.plan.add_wall(wall);
        self.active_wall = Some(id);
        self.content_changed();
    }

    /// Active wall id and its start point
    fn active_anchor(&self) -> Option<(WallId, Point)> {
        let id = self.active_wall.as_ref()?;
        let wall = self.plan.wall(id)?;
        Some((id.clone(), wall.start()))
    }
}

fn direction_of(v: Point) -> Option<Point> {
    if v.length() > MIN_DIRECTION_LENGTH {
        v.normalized()
    } else {
        None
    }
}
