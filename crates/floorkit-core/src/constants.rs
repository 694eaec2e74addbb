//! Shared numeric constants.
//!
//! All lengths are world units (millimeters).

/// Walls shorter than this are degenerate: no outline, excluded from queries.
pub const MIN_WALL_LENGTH: f64 = 0.1;

/// Two wall endpoints closer than this form a joint.
pub const JOINT_TOLERANCE: f64 = 0.5;

/// Miter points further than `ratio * max(half thickness)` from the joint are rejected.
pub const MITER_LIMIT_RATIO: f64 = 4.0;

/// Cross products below this magnitude mean parallel directions.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Projection denominators below this are treated as a zero-length segment.
pub const PROJECTION_EPSILON: f64 = 1e-4;

pub const DEFAULT_WALL_THICKNESS: f64 = 30.0;
pub const DEFAULT_WALL_HEIGHT: f64 = 200.0;

pub const DEFAULT_SNAP_TOLERANCE: f64 = 10.0;
pub const DEFAULT_GRID_SIZE: f64 = 100.0;

/// Endpoint grab radius in Select mode is the snap tolerance plus this margin.
pub const EDIT_HANDLE_MARGIN: f64 = 2.0;

/// Search radius when dropping an opening onto a wall.
pub const DROP_SEARCH_RADIUS: f64 = 50.0;

/// A dropped opening's center snaps to wall start, middle or end within this distance.
pub const DROP_SNAP_DISTANCE: f64 = 80.0;

pub const DEFAULT_OPENING_WIDTH: f64 = 900.0;
pub const DEFAULT_OPENING_HEIGHT: f64 = 2100.0;

/// A calibration line shorter than this is discarded.
pub const MIN_CALIBRATION_LENGTH: f64 = 1.0;

/// Pointer offsets shorter than this do not define a drawing direction.
pub const MIN_DIRECTION_LENGTH: f64 = 1e-3;

pub const PLAN_FILE_EXTENSION: &str = "fkplan";
pub const PLAN_FORMAT_VERSION: &str = "1.0";

pub const DEFAULT_RECENT_FILES: usize = 10;
