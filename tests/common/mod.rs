//! Example module pair shared by the integration tests.
//!
//! `Api1` raises `click` and reacts to `Api2`'s `error`; `Api2` raises `error` and
//! reacts to `Api1`'s `click`. Neither type refers to the other: the wiring lives in
//! [`api1_connect`] and [`api2_connect`].
#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use eventwire::{Args, CommandFn, CommandRef, EventSource, HandlerFn, Module};

pub const API1: &str = "Api1";
pub const API2: &str = "Api2";

/// Business object behind a module; remembers every call it received.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Vec<Value>>>,
}

impl Recorder {
    pub fn record(&self, args: &Args) {
        self.calls.lock().push(args.to_vec());
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last(&self) -> Option<Vec<Value>> {
        self.calls.lock().last().cloned()
    }
}

pub struct Api1 {
    source: EventSource,
    object: Arc<Recorder>,
}

impl Api1 {
    pub fn new(object: Arc<Recorder>) -> Arc<Self> {
        Arc::new(Self {
            source: EventSource::with_events(&["click"]),
            object,
        })
    }

    fn on_error_from_api2(&self, args: &Args) {
        self.object.record(args);
    }
}

impl Module for Api1 {
    fn name(&self) -> &str {
        API1
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

pub struct Api2 {
    source: EventSource,
    object: Arc<Recorder>,
}

impl Api2 {
    pub fn new(object: Arc<Recorder>) -> Arc<Self> {
        Arc::new(Self {
            source: EventSource::with_events(&["error"]),
            object,
        })
    }

    fn on_click_from_api1(&self, args: &Args) {
        self.object.record(args);
    }
}

impl Module for Api2 {
    fn name(&self) -> &str {
        API2
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

/// When `Api2` raises `error`, `Api1.on_error_from_api2` is called.
pub fn api1_connect() -> CommandRef {
    CommandFn::arc(API1, [API2], |registry| {
        let (Some(api1), Some(api2)) = (registry.get_as::<Api1>(API1), registry.get(API2)) else {
            return Ok(());
        };
        api2.subscribe("error")?
            .notify(&api1)?
            .by_calling("on_error_from_api2")
    })
}

/// When `Api1` raises `click`, `Api2.on_click_from_api1` is called.
pub fn api2_connect() -> CommandRef {
    CommandFn::arc(API2, [API1], |registry| {
        let (Some(api2), Some(api1)) = (registry.get_as::<Api2>(API2), registry.get(API1)) else {
            return Ok(());
        };
        api1.subscribe("click")?
            .notify(&api2)?
            .by_calling("on_click_from_api1")
    })
}

pub fn commands() -> Vec<CommandRef> {
    vec![api1_connect(), api2_connect()]
}
