//! Opening presets offered by the palette, and the drag payload that
//! carries one of them onto the design surface.

use floorkit_core::constants::{DEFAULT_OPENING_HEIGHT, DEFAULT_OPENING_WIDTH};
use floorkit_core::{DocumentError, Error, Result};
use serde::{Deserialize, Serialize};

use crate::opening::{OpeningKind, OpeningStyle};

/// A door or window template
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningPreset {
    pub style: OpeningStyle,
    pub width: f64,
    pub height: f64,
    pub sill: f64,
}

impl OpeningPreset {
    pub fn new(style: OpeningStyle, width: f64, height: f64, sill: f64) -> Self {
        Self {
            style,
            width,
            height,
            sill,
        }
    }

    pub fn kind(&self) -> OpeningKind {
        self.style.kind()
    }

    pub fn label(&self) -> &'static str {
        self.style.label()
    }

    /// Parse a drag payload.
    ///
    /// Parsing is lenient the way palette drops are: any kind other than
    /// `"door"` is a window, an unknown style falls back to the kind's
    /// default style and missing dimensions take the stock defaults.
    pub fn from_payload(payload: &str) -> Result<Self> {
        let raw: DragPayload = serde_json::from_str(payload).map_err(|e| {
            Error::from(DocumentError::Malformed {
                reason: e.to_string(),
            })
        })?;

        let kind = if raw.kind == "door" {
            OpeningKind::Door
        } else {
            OpeningKind::Window
        };
        let style = OpeningStyle::parse(kind, &raw.style).unwrap_or_else(|_| {
            tracing::debug!("Unknown {} style '{}', using default", kind.as_str(), raw.style);
            kind.default_style()
        });

        Ok(Self::new(style, raw.width, raw.height, raw.sill))
    }

    /// Encode as a drag payload
    pub fn to_payload(&self) -> Result<String> {
        let raw = DragPayload {
            kind: self.kind().as_str().to_string(),
            style: self.style.as_str().to_string(),
            width: self.width,
            height: self.height,
            sill: self.sill,
        };
        Ok(serde_json::to_string(&raw)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DragPayload {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    style: String,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default)]
    sill: f64,
}

fn default_width() -> f64 {
    DEFAULT_OPENING_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_OPENING_HEIGHT
}

/// The palette's opening templates
#[derive(Debug, Clone, Default)]
pub struct OpeningCatalog {
    presets: Vec<OpeningPreset>,
}

impl OpeningCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock doors and windows
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                OpeningPreset::new(OpeningStyle::SingleDoor, 64.0, 150.0, 0.0),
                OpeningPreset::new(OpeningStyle::DoubleDoor, 114.0, 150.0, 0.0),
                OpeningPreset::new(OpeningStyle::SlidingDoor, 86.0, 150.0, 0.0),
                OpeningPreset::new(OpeningStyle::CasementWindow, 100.0, 100.0, 50.0),
                OpeningPreset::new(OpeningStyle::SlidingWindow, 100.0, 100.0, 50.0),
                OpeningPreset::new(OpeningStyle::BayWindow, 100.0, 100.0, 50.0),
            ],
        }
    }

    pub fn add(&mut self, preset: OpeningPreset) {
        self.presets.push(preset);
    }

    pub fn presets(&self) -> &[OpeningPreset] {
        &self.presets
    }

    pub fn doors(&self) -> impl Iterator<Item = &OpeningPreset> {
        self.presets
            .iter()
            .filter(|p| p.kind() == OpeningKind::Door)
    }

    pub fn windows(&self) -> impl Iterator<Item = &OpeningPreset> {
        self.presets
            .iter()
            .filter(|p| p.kind() == OpeningKind::Window)
    }

    pub fn find(&self, style: OpeningStyle) -> Option<&OpeningPreset> {
        self.presets.iter().find(|p| p.style == style)
    }
}
