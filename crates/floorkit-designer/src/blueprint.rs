//! Background reference image used for tracing and calibration.

use std::path::{Path, PathBuf};

use crate::geometry::Point;

/// Opacity of a freshly placed blueprint
pub const DEFAULT_BLUEPRINT_OPACITY: f64 = 0.6;

/// A raster underlay. The core keeps only its metadata; decoding and
/// drawing the pixels is the renderer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    path: PathBuf,
    pixel_width: u32,
    pixel_height: u32,
    /// Scene units per image pixel
    scale: f64,
    opacity: f64,
    /// Rotation in degrees about the image center
    rotation: f64,
}

impl Blueprint {
    /// Blueprint at scale 1, centered on the scene origin
    pub fn new(path: impl Into<PathBuf>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            path: path.into(),
            pixel_width,
            pixel_height,
            scale: 1.0,
            opacity: DEFAULT_BLUEPRINT_OPACITY,
            rotation: 0.0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Non-positive scales are ignored
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !(scale > 0.0 && scale.is_finite()) {
            return false;
        }
        self.scale = scale;
        true
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        if !opacity.is_nan() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees.rem_euclid(360.0);
        }
    }

    /// Size in scene units
    pub fn scene_size(&self) -> (f64, f64) {
        (
            self.pixel_width as f64 * self.scale,
            self.pixel_height as f64 * self.scale,
        )
    }

    /// Top-left corner in scene space; the image stays centered on the origin
    pub fn origin(&self) -> Point {
        let (w, h) = self.scene_size();
        Point::new(-w / 2.0, -h / 2.0)
    }
}
