//! # FloorKit
//!
//! Floor plan editing core: walls with mitered joints, doors and windows
//! hosted on walls, and a pointer-driven design surface with snapping.
//!
//! ## Architecture
//!
//! FloorKit is organized as a workspace with multiple crates:
//!
//! 1. **floorkit-core** - Errors, event bus, interaction modes, length units
//! 2. **floorkit-settings** - Editor configuration and its persistence
//! 3. **floorkit-designer** - Walls, openings, snapping, design surface, plan files
//! 4. **floorkit** - This crate: re-exports and the command line entry point

pub use floorkit_core::{
    event_bus, AppEvent, DocumentError, Error, EventBus, EventCategory, EventFilter,
    InteractionMode, ProjectEvent, Result, SceneEvent,
};

pub use floorkit_settings::{Config, SettingsError};

pub use floorkit_designer::{
    Blueprint, DesignSurface, DesignerState, EventResult, FloorPlan, Key, Modifiers, MouseButton,
    Opening, OpeningCatalog, OpeningId, OpeningKind, OpeningPreset, OpeningStyle, PlanDocument,
    Point, Selection, SnapParams, Wall, WallId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Shape of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human readable output on stdout
    #[default]
    Pretty,
    /// One JSON object per line, for piping into other tools
    Json,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` narrows or widens the filter; without it everything at INFO
/// and above is shown. Fails if a subscriber is already installed.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stdout).json())
            .try_init()?,
    }

    Ok(())
}
