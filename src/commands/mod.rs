//! # Connect commands: declarative wiring policies.
//!
//! This module provides:
//! - [`ConnectCommand`] - trait a wiring policy implements
//! - [`CommandFn`] - closure-backed command
//! - [`CommandRef`] - shared reference to a command (`Arc<dyn ConnectCommand>`)

mod command;
mod command_fn;

pub use command::{CommandRef, ConnectCommand};
pub use command_fn::CommandFn;
