//! # Event sources: the publish/subscribe primitive.
//!
//! Every module embeds one [`EventSource`]. Other modules register interest in its
//! events through the [`Subscribe`] → [`Notify`] builder chain, and the owning module
//! publishes with [`EventSource::publish`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventwire::{Args, EventSource, HandlerFn, Module};
//!
//! struct Counter {
//!     source: EventSource,
//!     hits: parking_lot::Mutex<u32>,
//! }
//!
//! impl Counter {
//!     fn on_hit(&self, _args: &Args) { *self.hits.lock() += 1; }
//! }
//!
//! impl Module for Counter {
//!     fn name(&self) -> &str { "Counter" }
//!     fn source(&self) -> &EventSource { &self.source }
//!     fn handler(&self, method: &str) -> Option<HandlerFn<Self>> {
//!         (method == "on_hit").then_some(Self::on_hit as HandlerFn<Self>)
//!     }
//! }
//!
//! # fn main() -> Result<(), eventwire::Error> {
//! let button = EventSource::with_events(&["click"]);
//! let counter = Arc::new(Counter { source: EventSource::new(), hits: Default::default() });
//!
//! button.subscribe("click")?.notify(&counter)?.by_calling("on_hit")?;
//! button.publish("click", &[])?;
//! assert_eq!(*counter.hits.lock(), 1);
//! # Ok(())
//! # }
//! ```

mod event_source;
mod subscribe;

pub use event_source::{EventSource, SubscriptionInfo};
pub use subscribe::{Notify, Subscribe};
