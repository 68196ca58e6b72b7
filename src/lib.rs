//! # eventwire
//!
//! **eventwire** lets independently developed modules talk to each other through
//! named events without holding references to one another. A [`Coordinator`] wires
//! them together at runtime by running declarative [`ConnectCommand`]s whenever the
//! modules a command depends on become available, and strips subscriptions when a
//! module is unloaded.
//!
//! Everything is synchronous and in-process: `publish` calls every subscribed
//! handler on the caller's stack, in registration order.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ConnectCommand│   │ConnectCommand│   │ConnectCommand│
//!     │ subject: A   │   │ subject: B   │   │ subject: C   │
//!     │ objects: [B] │   │ objects: [A] │   │ objects: []  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Coordinator                                                      │
//! │  - commands (indexed by subject)                                  │
//! │  - Registry (name → Arc<dyn Module>, insertion order)             │
//! │  - lifecycle tracker (Unregistered → Loaded → Unloaded)           │
//! │  - ObserverSet (coordinator events → user observers)              │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ load/unload      │                  │
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Module A   │   │   Module B   │   │   Module C   │
//!     │ EventSource  │◄──┤ handlers     │   │ EventSource  │
//!     │  "click" ────┼──►│ on_click     │   │              │
//!     └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Coordinator::builder(cfg).with_commands(..).with_initial_modules(..).build()
//!   ├─► validate commands (non-empty, subjects, duplicates)
//!   ├─► seed registry
//!   └─► for each seeded module: commands[name]?.run(registry)
//!
//! load_module(M)
//!   ├─► registry[M.name] = M
//!   ├─► commands[M.name]?.run(registry)
//!   └─► rerun commands listing M.name as an object whose subject is loaded
//!
//! unload_module(N)
//!   ├─► no-op if N is not registered
//!   ├─► remove subscriptions with subscriber N from every loaded module
//!   └─► registry.remove(N)
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                         |
//! |-------------------|----------------------------------------------------------------|--------------------------------------------|
//! | **Modules**       | Named components with an embedded event source and handlers.  | [`Module`], [`HandlerFn`], [`Args`]        |
//! | **Pub/sub**       | Synchronous publish, idempotent subscription builder.         | [`EventSource`], [`Subscribe`], [`Notify`] |
//! | **Wiring**        | Declarative policies run as modules come and go.              | [`ConnectCommand`], [`CommandFn`]          |
//! | **Coordination**  | Registry ownership, rewiring, unwiring.                        | [`Coordinator`], [`Registry`]              |
//! | **Observability** | Coordinator events for logging and metrics.                   | [`Observe`], [`Event`], [`EventKind`]      |
//! | **Errors**        | Typed validation, configuration and contract errors.          | [`Error`], [`ValidationError`]             |
//! | **Configuration** | Coordinator settings and policies.                             | [`CoordinatorConfig`]                      |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], an observer writing coordinator events as `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use eventwire::{
//!     Args, CommandFn, CommandRef, Coordinator, EventSource, HandlerFn, Module,
//! };
//!
//! struct Button { source: EventSource }
//!
//! impl Module for Button {
//!     fn name(&self) -> &str { "Button" }
//!     fn source(&self) -> &EventSource { &self.source }
//! }
//!
//! struct Counter { source: EventSource, clicks: Mutex<u32> }
//!
//! impl Counter {
//!     fn on_click(&self, _args: &Args) { *self.clicks.lock() += 1; }
//! }
//!
//! impl Module for Counter {
//!     fn name(&self) -> &str { "Counter" }
//!     fn source(&self) -> &EventSource { &self.source }
//!     fn handler(&self, method: &str) -> Option<HandlerFn<Self>> {
//!         match method {
//!             "on_click" => Some(Self::on_click),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), eventwire::Error> {
//! // Counter listens to Button's clicks once both are loaded.
//! let connect_counter: CommandRef = CommandFn::arc("Counter", ["Button"], |registry| {
//!     let (Some(counter), Some(button)) = (
//!         registry.get_as::<Counter>("Counter"),
//!         registry.get("Button"),
//!     ) else {
//!         return Ok(());
//!     };
//!     button.subscribe("click")?.notify(&counter)?.by_calling("on_click")
//! });
//!
//! let counter = Arc::new(Counter { source: EventSource::new(), clicks: Mutex::new(0) });
//! let coordinator = Coordinator::new(vec![connect_counter], vec![counter.clone()])?;
//!
//! let button = Arc::new(Button { source: EventSource::with_events(&["click"]) });
//! coordinator.load_module(button.clone())?;
//!
//! button.publish("click", &[])?;
//! assert_eq!(*counter.clicks.lock(), 1);
//!
//! coordinator.unload_module("Counter")?;
//! button.publish("click", &[])?;
//! assert_eq!(*counter.clicks.lock(), 1);
//! # Ok(())
//! # }
//! ```
mod commands;
mod core;
mod error;
mod events;
mod modules;
mod observers;
mod policies;
mod source;

// ---- Public re-exports ----

pub use commands::{CommandFn, CommandRef, ConnectCommand};
pub use core::{Coordinator, CoordinatorBuilder, CoordinatorConfig, ModuleState, Registry};
pub use error::{ConfigurationError, ContractError, Error, ValidationError};
pub use events::{Event, EventKind};
pub use modules::{Args, AsAny, HandlerFn, Module};
pub use observers::{Observe, ObserverSet};
pub use policies::DuplicateSubjectPolicy;
pub use source::{EventSource, Notify, Subscribe, SubscriptionInfo};

// Optional: expose a tracing-backed observer.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
