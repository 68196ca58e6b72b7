//! # Example: api_pair
//!
//! Two modules that know nothing about each other, wired by connect commands.
//!
//! Demonstrates how to:
//! - Give each module a declared event catalogue and a handler table.
//! - Describe the wiring with [`CommandFn`] instead of in the modules themselves.
//! - Load, unload and reload modules and watch the coordinator rewire them.
//!
//! ## Flow
//! ```text
//! Coordinator::new([api1_connect, api2_connect], [Api1])
//!     └─► Api1 command runs: Api2 missing, nothing wired
//! load_module(Api2)
//!     ├─► Api2 command: Api1.click  ──► Api2.on_click_from_api1
//!     └─► Api1 command: Api2.error  ──► Api1.on_error_from_api2
//! unload_module(Api1)
//!     └─► Api2.error subscription held by Api1 removed
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example api_pair --features logging
//! ```

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eventwire::{
    Args, CommandFn, CommandRef, Coordinator, CoordinatorConfig, Error, EventSource, HandlerFn,
    LogWriter, Module,
};

/// Business object residing behind `Api1`.
struct Storefront;

impl Storefront {
    fn on_error_from_api2(&self, args: &Args) {
        info!(?args, "storefront: payment backend reported an error");
    }
}

/// Business object residing behind `Api2`.
struct PaymentBackend;

impl PaymentBackend {
    fn on_click_from_api1(&self, args: &Args) {
        info!(?args, "payment backend: checkout clicked");
    }
}

/// Raises `click`; reacts to errors from whoever it is wired to.
struct Api1 {
    source: EventSource,
    object: Storefront,
}

impl Api1 {
    fn on_error_from_api2(&self, args: &Args) {
        self.object.on_error_from_api2(args);
    }
}

impl Module for Api1 {
    fn name(&self) -> &str {
        "Api1"
    }

    fn source(&self) -> &EventSource {
        &self.source
    }

    fn handler(&self, method: &str) -> Option<HandlerFn<Self>> {
        match method {
            "on_error_from_api2" => Some(Self::on_error_from_api2),
            _ => None,
        }
    }
}

/// Raises `error`; reacts to clicks from whoever it is wired to.
struct Api2 {
    source: EventSource,
    object: PaymentBackend,
}

impl Api2 {
    fn on_click_from_api1(&self, args: &Args) {
        self.object.on_click_from_api1(args);
    }
}

impl Module for Api2 {
    fn name(&self) -> &str {
        "Api2"
    }

    fn source(&self) -> &EventSource {
        &self.source
    }

    fn handler(&self, method: &str) -> Option<HandlerFn<Self>> {
        match method {
            "on_click_from_api1" => Some(Self::on_click_from_api1),
            _ => None,
        }
    }
}

fn api1_connect() -> CommandRef {
    CommandFn::arc("Api1", ["Api2"], |registry| {
        let (Some(api1), Some(api2)) = (registry.get_as::<Api1>("Api1"), registry.get("Api2"))
        else {
            return Ok(());
        };
        api2.subscribe("error")?
            .notify(&api1)?
            .by_calling("on_error_from_api2")
    })
}

fn api2_connect() -> CommandRef {
    CommandFn::arc("Api2", ["Api1"], |registry| {
        let (Some(api2), Some(api1)) = (registry.get_as::<Api2>("Api2"), registry.get("Api1"))
        else {
            return Ok(());
        };
        api1.subscribe("click")?
            .notify(&api2)?
            .by_calling("on_click_from_api1")
    })
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api1 = Arc::new(Api1 {
        source: EventSource::with_events(&["click"]),
        object: Storefront,
    });
    let api2 = Arc::new(Api2 {
        source: EventSource::with_events(&["error"]),
        object: PaymentBackend,
    });

    let coordinator = Coordinator::builder(CoordinatorConfig::default())
        .with_commands(vec![api1_connect(), api2_connect()])
        .with_initial_modules(vec![api1.clone()])
        .with_observers(vec![Arc::new(LogWriter::new())])
        .build()?;

    // Nobody listens yet.
    api1.publish("click", &[json!("checkout")])?;

    coordinator.load_module(api2.clone())?;
    api1.publish("click", &[json!("checkout"), json!({"items": 3})])?;
    api2.publish("error", &[json!("card declined")])?;

    coordinator.unload_module("Api1")?;
    api2.publish("error", &[json!("nobody hears this")])?;

    coordinator.load_module(api1.clone())?;
    api2.publish("error", &[json!("heard again")])?;

    info!(loaded = ?coordinator.loaded(), "done");
    Ok(())
}
