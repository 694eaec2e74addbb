//! # Event Bus Module
//!
//! Publish/subscribe channel between the editing core and its consumers
//! (3D preview mesh builder, property panel, window chrome).
//!
//! The core never pushes deltas. It announces that scene content changed,
//! that the interaction mode changed, or that a calibration length was
//! measured, and consumers re-pull whatever they need.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_core::event_bus::{event_bus, AppEvent, EventCategory, EventFilter, SceneEvent};
//!
//! let subscription = event_bus().subscribe(
//!     EventFilter::only(EventCategory::Scene),
//!     |event| {
//!         if let AppEvent::Scene(SceneEvent::ContentChanged) = event {
//!             // rebuild the 3D preview
//!         }
//!     },
//! );
//!
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
