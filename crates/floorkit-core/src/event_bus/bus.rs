//! The bus itself.
//!
//! Synchronous listeners run on the publishing thread in subscription order,
//! which is what the editor's own panels rely on. Async consumers (a mesh
//! builder on a worker task, for instance) take a tokio broadcast receiver.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "listener-{}", &simple[..8])
    }
}

/// Which events a listener wants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Only(Vec<EventCategory>),
}

impl EventFilter {
    /// Filter for a single category
    pub fn only(category: EventCategory) -> Self {
        EventFilter::Only(vec![category])
    }

    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(categories) => categories.contains(&event.category()),
        }
    }
}

type Handler = Box<dyn Fn(&AppEvent) + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Handler,
}

/// Construction options for an [`EventBus`]
#[derive(Debug, Clone)]
pub struct BusOptions {
    /// Capacity of the broadcast channel handed to async receivers.
    pub capacity: usize,
    /// Keep the last `n` published events, for tests and diagnostics.
    pub history: Option<usize>,
}

impl Default for BusOptions {
    fn default() -> Self {
        Self {
            capacity: 256,
            history: None,
        }
    }
}

impl BusOptions {
    /// Default options with a bounded event history
    pub fn recording(limit: usize) -> Self {
        Self {
            history: Some(limit),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    #[error("The global event bus is already running")]
    AlreadyInstalled,
}

pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
    sender: broadcast::Sender<AppEvent>,
    history: Option<RwLock<VecDeque<AppEvent>>>,
    history_limit: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_options(BusOptions::default())
    }

    pub fn with_options(options: BusOptions) -> Self {
        let (sender, _) = broadcast::channel(options.capacity.max(1));
        Self {
            listeners: RwLock::new(Vec::new()),
            sender,
            history: options.history.map(|_| RwLock::new(VecDeque::new())),
            history_limit: options.history.unwrap_or(0),
        }
    }

    /// Publish an event.
    ///
    /// Returns how many consumers saw it: matching listeners plus live async
    /// receivers. Publishing with nobody listening is fine.
    pub fn publish(&self, event: AppEvent) -> usize {
        tracing::trace!("event: {}", event.description());

        if let Some(history) = &self.history {
            let mut history = history.write();
            if history.len() == self.history_limit {
                history.pop_front();
            }
            if self.history_limit > 0 {
                history.push_back(event.clone());
            }
        }

        let notified = self
            .listeners
            .read()
            .iter()
            .filter(|l| l.filter.matches(&event))
            .map(|l| (l.handler)(&event))
            .count();

        // send() only fails when no receiver is alive
        notified + self.sender.send(event).unwrap_or(0)
    }

    /// Register a synchronous listener.
    ///
    /// The handler runs inside `publish`, so it must not publish on, or
    /// subscribe to, the same bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.write().push(Listener {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("{} subscribed", id);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!("{} unsubscribed", id);
        }
        removed
    }

    /// Receiver for async consumers; it sees events published after this call
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_recording(&self) -> bool {
        self.history.is_some()
    }

    /// Recorded events, oldest first
    pub fn history(&self) -> Vec<AppEvent> {
        self.history_matching(&EventFilter::All)
    }

    /// Recorded events that pass `filter`, oldest first
    pub fn history_matching(&self, filter: &EventFilter) -> Vec<AppEvent> {
        match &self.history {
            Some(history) => history
                .read()
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn clear_history(&self) {
        if let Some(history) = &self.history {
            history.write().clear();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .field("recording", &self.is_recording())
            .finish()
    }
}

static GLOBAL_BUS: OnceLock<EventBus> = OnceLock::new();

/// The application-wide bus, created with default options on first use
pub fn event_bus() -> &'static EventBus {
    GLOBAL_BUS.get_or_init(EventBus::new)
}

/// Create the application-wide bus with custom options.
///
/// Fails once [`event_bus`] has been called.
pub fn install_event_bus(options: BusOptions) -> Result<(), EventBusError> {
    GLOBAL_BUS
        .set(EventBus::with_options(options))
        .map_err(|_| EventBusError::AlreadyInstalled)
}

/// Publish on the application-wide bus
#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::event_bus::event_bus().publish($event)
    };
}

/// Listen on the application-wide bus
#[macro_export]
macro_rules! on_event {
    ($filter:expr, $handler:expr) => {
        $crate::event_bus::event_bus().subscribe($filter, $handler)
    };
}
