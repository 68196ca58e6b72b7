//! # Coordinator observers.
//!
//! This module provides the [`Observe`] trait and [`ObserverSet`] fan-out for
//! handling coordinator [`Event`](crate::Event)s.
//!
//! ## Observer types
//! - **Passive observers** - react to events (logging, metrics)
//! - **Probes** - record events for tests
//!
//! Optional: [`LogWriter`] (feature `logging`) writes events as tracing records.

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
