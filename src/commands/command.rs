//! # Connect command contract.
//!
//! A [`ConnectCommand`] names the module it wires (its *subject*) and the modules
//! it depends on (its *objects*). The coordinator calls [`ConnectCommand::run`]
//! whenever the subject or one of the objects is loaded.
//!
//! ## Contract
//! - `subject()` must be non-empty; the coordinator rejects the command otherwise.
//! - `run` must be safe to call repeatedly against the same registry state.
//!   Subscription registration is idempotent, so re-registering is fine.
//! - A missing object module is not an error: `run` skips that wiring and returns `Ok(())`.

use std::sync::Arc;

use crate::core::Registry;
use crate::error::Error;

/// Shared handle to a connect command.
pub type CommandRef = Arc<dyn ConnectCommand>;

/// # Wiring policy for one subject module.
///
/// # Example
/// ```
/// use eventwire::{ConnectCommand, Error, Registry};
///
/// struct AuditConnect;
///
/// impl ConnectCommand for AuditConnect {
///     fn subject(&self) -> &str { "Audit" }
///     fn objects(&self) -> Vec<&str> { vec!["Billing"] }
///
///     fn run(&self, registry: &Registry) -> Result<(), Error> {
///         let Some(_billing) = registry.get("Billing") else {
///             return Ok(()); // not loaded yet
///         };
///         // billing.subscribe(..)?.notify(..)?.by_calling(..)?
///         Ok(())
///     }
/// }
/// ```
pub trait ConnectCommand: Send + Sync + 'static {
    /// Returns the name of the module this command configures.
    fn subject(&self) -> &str;

    /// Returns the names of the modules this command depends on.
    fn objects(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Establishes the subject's subscriptions given the current registry.
    fn run(&self, registry: &Registry) -> Result<(), Error>;

    /// Returns `true` if `module` is one of this command's objects.
    fn depends_on(&self, module: &str) -> bool {
        self.objects().into_iter().any(|o| o == module)
    }
}
