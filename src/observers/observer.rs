//! # Observer: user-facing coordinator event handlers
//!
//! The [`Observe`] trait is the **extension point** for watching what the coordinator
//! does: which modules were loaded, which commands ran, how many subscriptions an
//! unload stripped.
//!
//! Implementing your own observer allows you to plug in:
//! - metrics export;
//! - structured logging (see [`LogWriter`](crate::LogWriter) with the `logging` feature);
//! - test probes.
//!
//! # High-level architecture:
//! ```text
//! Coordinator ── emit(&Event) ──► ObserverSet ──► Observe::on_event(&Event)
//!                                      │
//!              ┌───────────────────────┼───────────────────────┐
//!              ▼                       ▼                       ▼
//!          LogWriter              MetricsObserver         CustomObserver
//!          (tracing)                                      (user logic)
//! ```
//!
//! # Example: custom observer
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventwire::{Event, EventKind, Observe};
//!
//! #[derive(Default)]
//! struct CommandCounter(AtomicUsize);
//!
//! impl Observe for CommandCounter {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::CommandRan {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "command-counter" }
//! }
//! ```

use crate::events::Event;

/// # Trait for receiving coordinator events.
///
/// Called synchronously, in the coordinator's call stack, after the state change the
/// event describes has been applied.
///
/// ### Implementation requirements
/// - Return quickly; the coordinator waits for every observer.
/// - Handle errors internally. Panics are caught and reported as
///   `EventKind::ObserverPanicked` to the other observers.
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    fn on_event(&self, event: &Event);

    /// Returns the observer name used in panic reports.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
