//! Coordinator events: types only.
//!
//! This module holds the event **data model** the coordinator hands to its
//! observers. Delivery is synchronous: the coordinator emits each event to its
//! [`ObserverSet`](crate::ObserverSet) and feeds the lifecycle tracker directly.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `Coordinator` (load, unload, command runs) and `ObserverSet` (panics).
//! - **Consumers**: the coordinator's lifecycle tracker and user observers.

mod event;

pub use event::{Event, EventKind};
