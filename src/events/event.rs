//! # Coordinator events.
//!
//! The [`EventKind`] enum classifies what the coordinator did:
//! - **Registry events**: modules loaded, replaced, unloaded
//! - **Wiring events**: connect commands run or failed, subscriptions pruned
//! - **Observer events**: an observer panicked while handling an event
//!
//! These are diagnostics about the coordinator itself. Module-to-module events flow
//! through [`EventSource`](crate::EventSource), not through this type.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use eventwire::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CommandRan)
//!     .with_module("Api2")
//!     .with_command("Api1");
//!
//! assert_eq!(ev.kind, EventKind::CommandRan);
//! assert_eq!(ev.module.as_deref(), Some("Api2"));
//! assert_eq!(ev.command.as_deref(), Some("Api1"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of coordinator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registry events ===
    /// Module was added to the registry under a new name.
    ///
    /// Sets:
    /// - `module`: module name
    ModuleLoaded,

    /// Module was loaded under a name already registered; the old instance was replaced.
    ///
    /// Sets:
    /// - `module`: module name
    ModuleReplaced,

    /// Module was removed from the registry.
    ///
    /// Sets:
    /// - `module`: module name
    /// - `count`: subscriptions removed from remaining modules
    ModuleUnloaded,

    /// Unload was requested for a name that is not registered (no-op).
    ///
    /// Sets:
    /// - `module`: requested name
    UnloadSkipped,

    // === Wiring events ===
    /// Connect command ran successfully.
    ///
    /// Sets:
    /// - `command`: subject of the command
    /// - `module`: module whose arrival triggered the run
    CommandRan,

    /// Connect command returned an error.
    ///
    /// Sets:
    /// - `command`: subject of the command
    /// - `module`: module whose arrival triggered the run
    /// - `reason`: error message
    CommandFailed,

    /// Subscriptions held by an unloading module were stripped from one module.
    ///
    /// Sets:
    /// - `module`: module whose subscription lists were pruned
    /// - `reason`: name of the unloading subscriber
    /// - `count`: subscriptions removed
    SubscriptionsPruned,

    // === Observer events ===
    /// Observer panicked while handling an event.
    ///
    /// Sets:
    /// - `module`: observer name
    /// - `reason`: panic message
    ObserverPanicked,
}

/// Coordinator event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Module (or observer) name, if applicable.
    pub module: Option<Arc<str>>,
    /// Subject of the connect command, if applicable.
    pub command: Option<Arc<str>>,
    /// Number of affected subscriptions, if applicable.
    pub count: Option<usize>,
    /// Human-readable reason (errors, panic messages, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            module: None,
            command: None,
            count: None,
            reason: None,
        }
    }

    /// Attaches a module name.
    #[inline]
    pub fn with_module(mut self, module: impl Into<Arc<str>>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Attaches the subject of a connect command.
    #[inline]
    pub fn with_command(mut self, command: impl Into<Arc<str>>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Attaches a subscription count.
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        Event::new(EventKind::ObserverPanicked)
            .with_module(observer)
            .with_reason(info)
    }

    #[inline]
    pub fn is_observer_panic(&self) -> bool {
        matches!(self.kind, EventKind::ObserverPanicked)
    }
}
