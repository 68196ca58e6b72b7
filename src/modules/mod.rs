//! # Module abstraction.
//!
//! - [`Module`] - trait every wireable component implements
//! - [`Args`] - event argument slice
//! - [`HandlerFn`] - typed named handler

mod module;

pub use module::{Args, AsAny, HandlerFn, Module};
