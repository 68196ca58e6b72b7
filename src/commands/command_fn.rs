//! # Closure-backed connect command (`CommandFn`)
//!
//! [`CommandFn`] wraps a closure `F: Fn(&Registry) -> Result<(), Error>` together with
//! the subject and object names, for wiring that does not warrant its own type.
//! Names may be static strings or built at runtime.
//!
//! ## Example
//! ```rust
//! use eventwire::{CommandFn, CommandRef, ConnectCommand};
//!
//! let cmd: CommandRef = CommandFn::arc("Audit", ["Billing"], |registry| {
//!     if !registry.contains("Billing") {
//!         return Ok(());
//!     }
//!     // wire Billing events to Audit handlers...
//!     Ok(())
//! });
//!
//! assert_eq!(cmd.subject(), "Audit");
//! assert!(cmd.depends_on("Billing"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::commands::ConnectCommand;
use crate::core::Registry;
use crate::error::Error;

/// Function-backed connect command.
pub struct CommandFn<F> {
    subject: Cow<'static, str>,
    objects: Vec<Cow<'static, str>>,
    f: F,
}

impl<F> CommandFn<F>
where
    F: Fn(&Registry) -> Result<(), Error> + Send + Sync + 'static,
{
    /// Creates a new function-backed command.
    ///
    /// Prefer [`CommandFn::arc`] when you immediately need a [`CommandRef`](crate::CommandRef).
    pub fn new(
        subject: impl Into<Cow<'static, str>>,
        objects: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
        f: F,
    ) -> Self {
        Self {
            subject: subject.into(),
            objects: objects.into_iter().map(Into::into).collect(),
            f,
        }
    }

    /// Creates the command and returns it as a shared handle.
    pub fn arc(
        subject: impl Into<Cow<'static, str>>,
        objects: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
        f: F,
    ) -> Arc<Self> {
        Arc::new(Self::new(subject, objects, f))
    }
}

impl<F> ConnectCommand for CommandFn<F>
where
    F: Fn(&Registry) -> Result<(), Error> + Send + Sync + 'static,
{
    fn subject(&self) -> &str {
        &self.subject
    }

    fn objects(&self) -> Vec<&str> {
        self.objects.iter().map(|o| &**o).collect()
    }

    fn run(&self, registry: &Registry) -> Result<(), Error> {
        (self.f)(registry)
    }
}

impl<F> fmt::Debug for CommandFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFn")
            .field("subject", &self.subject)
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}
