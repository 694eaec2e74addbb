//! Calibrate mode: measure a reference line on the blueprint and rescale
//! it once the real-world length is known.

use floorkit_core::constants::MIN_CALIBRATION_LENGTH;
use floorkit_core::{AppEvent, InteractionMode, SceneEvent};

use super::{DesignSurface, EventResult, MouseButton};
use crate::geometry::Point;

/// Reference line drawn over the blueprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationLine {
    pub start: Point,
    pub end: Point,
}

impl CalibrationLine {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct Calibration {
    line: Option<CalibrationLine>,
    /// Length of the finished line, zero while it is still rubber-banding
    measured: f64,
}

impl DesignSurface {
    pub fn calibration_line(&self) -> Option<&CalibrationLine> {
        self.calibration.line.as_ref()
    }

    /// Length awaiting a real-world value, zero when none is pending
    pub fn measured_length(&self) -> f64 {
        self.calibration.measured
    }

    pub fn reset_calibration(&mut self) {
        self.calibration = Calibration::default();
    }

    /// Rescale the blueprint so the measured line is `actual` long, then
    /// return to Select mode. Invalid input only clears the calibration.
    pub fn apply_calibration(&mut self, actual: f64) -> bool {
        let measured = self.calibration.measured;
        let valid = actual > 0.0 && actual.is_finite() && measured > 0.0;

        let applied = match self.blueprint.as_mut() {
            Some(bp) if valid => {
                let scale = bp.scale() * actual / measured;
                tracing::info!(
                    "Calibrated blueprint: {:.1} measured = {:.1} mm, scale {:.4}",
                    measured,
                    actual,
                    scale
                );
                bp.set_scale(scale)
            }
            _ => false,
        };

        self.reset_calibration();
        if applied {
            self.content_changed();
            self.set_mode(InteractionMode::Select);
        }
        applied
    }

    /// First click anchors the line, the second measures it. A click after a
    /// measurement starts a new line.
    pub(super) fn calibrate_press(&mut self, pos: Point, button: MouseButton) -> EventResult {
        if button != MouseButton::Left {
            return EventResult::Ignored;
        }
        if self.blueprint.is_none() {
            tracing::debug!("Calibration needs a blueprint");
            return EventResult::Handled;
        }

        match self.calibration.line {
            Some(mut line) if self.calibration.measured == 0.0 => {
                line.end = pos;
                let length = line.length();
                if length < MIN_CALIBRATION_LENGTH {
                    self.reset_calibration();
                    return EventResult::Handled;
                }
                self.calibration.line = Some(line);
                self.calibration.measured = length;
                tracing::debug!("Calibration line measured at {:.2}", length);
                self.bus.publish(AppEvent::Scene(SceneEvent::CalibrationRequested {
                    measured_length: length,
                }));
            }
            _ => {
                self.calibration = Calibration {
                    line: Some(CalibrationLine {
                        start: pos,
                        end: pos,
                    }),
                    measured: 0.0,
                };
            }
        }
        EventResult::Handled
    }

    pub(super) fn calibrate_move(&mut self, pos: Point) -> EventResult {
        match self.calibration.line.as_mut() {
            Some(line) if self.calibration.measured == 0.0 => {
                line.end = pos;
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
}
