//! # FloorKit Designer
//!
//! The geometry and interaction core of the FloorKit floor plan editor.
//!
//! ## Core Components
//!
//! ### Model
//! - **Walls**: centerline segments with thickness and height, mitered
//!   against the walls they share a joint with
//! - **Openings**: doors and windows hosted on a wall at a distance along
//!   its centerline; their position is always derived from the wall
//! - **Floor plan**: the store that keeps outlines and openings in sync
//!   whenever a wall changes
//!
//! ### Interaction
//! - **Design surface**: Select, DrawWall and Calibrate modes driven by
//!   pointer and keyboard events
//! - **Snapping**: wall endpoints, midpoints, segments and grid
//! - **Catalog**: door and window presets for drag-and-drop placement
//!
//! ### Project
//! - **Serialization**: the `.fkplan` JSON document
//! - **Designer state**: save/load, dirty tracking, autosave, recent files
//!
//! ## Architecture
//!
//! ```text
//! DesignSurface (modes, transient state)
//!   ├── Snapping (constraint pipeline)
//!   └── FloorPlan
//!         ├── Wall ── miter engine (outline)
//!         └── Opening (derived placement)
//!
//! DesignerState (project file, autosave)
//!   └── PlanDocument (JSON)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_designer::{DesignSurface, Modifiers, MouseButton, Point};
//! use floorkit_core::InteractionMode;
//!
//! let mut surface = DesignSurface::new();
//! surface.set_mode(InteractionMode::DrawWall);
//! surface.mouse_press(Point::new(0.0, 0.0), MouseButton::Left, Modifiers::NONE);
//! surface.mouse_press(Point::new(4000.0, 0.0), MouseButton::Left, Modifiers::NONE);
//! surface.mouse_press(Point::new(4000.0, 3000.0), MouseButton::Right, Modifiers::NONE);
//! ```

pub mod blueprint;
pub mod catalog;
pub mod designer_state;
pub mod geometry;
pub mod miter;
pub mod opening;
pub mod plan;
pub mod serialization;
pub mod snapping;
pub mod surface;
pub mod wall;

pub use blueprint::Blueprint;
pub use catalog::{OpeningCatalog, OpeningPreset};
pub use designer_state::DesignerState;
pub use geometry::Point;
pub use opening::{Opening, OpeningId, OpeningKind, OpeningStyle, Placement};
pub use plan::{FloorPlan, WallEnd, WallHit};
pub use serialization::PlanDocument;
pub use snapping::{SnapParams, SnapResult, SnapTarget};
pub use surface::{
    CalibrationLine, DesignSurface, EventResult, Key, LengthIndicator, Modifiers, MouseButton,
    Selection,
};
pub use wall::{Wall, WallId};
