//! Runtime core: registry, wiring and lifecycle.
//!
//! The public API from this module is [`Coordinator`] (with its builder and config),
//! the read-only [`Registry`] view and [`ModuleState`].
//!
//! Internal modules:
//! - [`coordinator`]: runs connect commands on load, prunes subscriptions on unload;
//! - [`builder`]: validates and indexes commands, seeds the registry;
//! - [`registry`]: insertion-ordered name → module map;
//! - [`lifecycle`]: per-name `Unregistered → Loaded → Unloaded` tracking;
//! - [`config`]: coordinator settings.

mod builder;
mod config;
mod coordinator;
mod lifecycle;
mod registry;

pub use builder::CoordinatorBuilder;
pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use lifecycle::ModuleState;
pub use registry::Registry;
