//! # FloorKit Core
//!
//! Core types and utilities shared by the FloorKit crates.
//! Provides the error types, the application event bus, the interaction
//! mode enum and length formatting helpers.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod types;
pub mod units;

pub use error::{DocumentError, Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, BusOptions, EventBus, EventCategory, EventFilter, ProjectEvent,
    SceneEvent, SettingsEvent, SubscriptionId,
};

pub use types::InteractionMode;
