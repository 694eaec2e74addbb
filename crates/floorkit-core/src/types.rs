//! Small shared types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction mode of a design surface.
///
/// Changes only through an explicit mode switch, never as a side effect of
/// pointer or keyboard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Select,
    DrawWall,
    Calibrate,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "Select"),
            Self::DrawWall => write!(f, "Draw wall"),
            Self::Calibrate => write!(f, "Calibrate"),
        }
    }
}
