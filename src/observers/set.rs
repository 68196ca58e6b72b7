//! # ObserverSet: synchronous fan-out over multiple observers
//!
//! [`ObserverSet`] hands each [`Event`] to every observer, in the order they were
//! supplied, on the caller's stack.
//!
//! ## What it guarantees
//! - Every observer sees every event, in emission order.
//! - A panicking observer does not stop delivery to the others.
//!
//! ## Panic handling
//! Each call is wrapped in `catch_unwind`:
//! - the panic message is logged and re-emitted as `ObserverPanicked`
//! - `ObserverPanicked` events are never re-emitted, so a panicking observer
//!   cannot trigger a feedback loop
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if an observer panics while holding a lock.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► observer 1.on_event()
//!        ├──► observer 2.on_event()  ── panic ──► emit(ObserverPanicked)
//!        └──► observer N.on_event()
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::events::Event;
use crate::observers::Observe;

/// Fan-out over a fixed list of observers.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn Observe>>,
}

impl ObserverSet {
    /// Creates a set over the given observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        Self { observers }
    }

    /// Returns the number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if there are no observers.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` to every observer.
    pub fn emit(&self, event: &Event) {
        let mut panics = Vec::new();

        for obs in &self.observers {
            let res = panic::catch_unwind(AssertUnwindSafe(|| obs.on_event(event)));
            if let Err(payload) = res {
                let info = panic_message(payload.as_ref());
                warn!(observer = obs.name(), info = %info, "observer panicked");
                panics.push(Event::observer_panicked(obs.name(), info));
            }
        }

        if event.is_observer_panic() {
            return;
        }
        for ev in &panics {
            self.emit(ev);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
