//! # Module trait.
//!
//! A [`Module`] is a named component that publishes events through its embedded
//! [`EventSource`] and exposes a closed set of named handlers other modules' events
//! can be routed to.
//!
//! ## Rules
//! - [`Module::name`] is assigned by the module type at construction and never changes.
//! - Handlers are plain `fn(&Self, &Args)` items resolved by name in [`Module::handler`];
//!   the compiler checks each one is invocable with the event arguments.
//! - The registry stores modules as `Arc<dyn Module>`; connect commands recover the
//!   concrete type with [`Registry::get_as`](crate::Registry::get_as).
//!
//! ## Example
//! ```rust
//! use eventwire::{Args, EventSource, HandlerFn, Module};
//!
//! struct Clock {
//!     source: EventSource,
//! }
//!
//! impl Clock {
//!     fn on_tick(&self, _args: &Args) {}
//! }
//!
//! impl Module for Clock {
//!     fn name(&self) -> &str { "Clock" }
//!     fn source(&self) -> &EventSource { &self.source }
//!     fn handler(&self, method: &str) -> Option<HandlerFn<Self>> {
//!         match method {
//!             "on_tick" => Some(Self::on_tick),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::source::{EventSource, Subscribe};

/// Event arguments, passed unchanged from publisher to every callback.
pub type Args = [serde_json::Value];

/// A named handler on module type `M`.
pub type HandlerFn<M> = fn(&M, &Args);

/// Upcast helper so `Arc<dyn Module>` can be downcast to its concrete type.
pub trait AsAny: Any + Send + Sync {
    /// Converts the shared handle into `Arc<dyn Any>`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// # Independently developed component that publishes and handles events.
pub trait Module: AsAny + Send + Sync + 'static {
    /// Returns the module's stable name (registry key and subscriber identity).
    fn name(&self) -> &str;

    /// Returns the embedded event source.
    fn source(&self) -> &EventSource;

    /// Resolves a handler by name.
    ///
    /// Returns `None` when the module has no such handler; registration then fails
    /// with [`ContractError::UnknownHandler`](crate::ContractError::UnknownHandler).
    fn handler(&self, method: &str) -> Option<HandlerFn<Self>>
    where
        Self: Sized,
    {
        let _ = method;
        None
    }

    /// Publishes `event` on this module's source.
    ///
    /// See [`EventSource::publish`].
    fn publish(&self, event: &str, args: &Args) -> Result<(), ValidationError> {
        self.source().publish(event, args)
    }

    /// Starts a subscription to `event` on this module's source.
    ///
    /// See [`EventSource::subscribe`].
    fn subscribe(&self, event: &str) -> Result<Subscribe<'_>, ValidationError> {
        self.source().subscribe(event)
    }
}
