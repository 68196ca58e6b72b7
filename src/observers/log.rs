//! # LogWriter: coordinator events as tracing records
//!
//! A minimal observer that writes each [`Event`] as a structured `tracing` record.
//! Install a `tracing` subscriber (e.g. `tracing-subscriber`) to see the output.
//!
//! ## Example output
//! ```text
//! INFO eventwire: [loaded] module="Api1"
//! INFO eventwire: [command] subject="Api2" trigger="Api1"
//! INFO eventwire: [unloaded] module="Api1" pruned=1
//! WARN eventwire: [command-failed] subject="Api1" trigger="Api2" reason=...
//! ```

use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::observers::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogWriter {
    fn on_event(&self, e: &Event) {
        let module = e.module.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::ModuleLoaded => {
                info!(target: "eventwire", seq = e.seq, module, "[loaded]");
            }
            EventKind::ModuleReplaced => {
                info!(target: "eventwire", seq = e.seq, module, "[replaced]");
            }
            EventKind::ModuleUnloaded => {
                info!(target: "eventwire", seq = e.seq, module, pruned = e.count.unwrap_or(0), "[unloaded]");
            }
            EventKind::UnloadSkipped => {
                debug!(target: "eventwire", seq = e.seq, module, "[unload-skipped]");
            }
            EventKind::CommandRan => {
                info!(target: "eventwire", seq = e.seq, subject = ?e.command, trigger = module, "[command]");
            }
            EventKind::CommandFailed => {
                warn!(target: "eventwire", seq = e.seq, subject = ?e.command, trigger = module, reason = ?e.reason, "[command-failed]");
            }
            EventKind::SubscriptionsPruned => {
                debug!(target: "eventwire", seq = e.seq, module, subscriber = ?e.reason, count = e.count.unwrap_or(0), "[pruned]");
            }
            EventKind::ObserverPanicked => {
                warn!(target: "eventwire", seq = e.seq, observer = module, info = ?e.reason, "[observer-panicked]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
