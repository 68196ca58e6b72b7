//! # Module lifecycle tracker with sequence-based ordering.
//!
//! Tracks, per module name, the state machine
//! `Unregistered → Loaded → Unloaded → Loaded → …`.
//!
//! ## Architecture
//! ```text
//! Coordinator ──► emit(Event) ──► LifecycleTracker::update()
//!                                         │
//!                                         ▼
//!                             HashMap<String, Entry>
//!                               (name → {seq, state})
//! ```
//!
//! ## Rules
//! - Only `ModuleLoaded` / `ModuleReplaced` / `ModuleUnloaded` change state
//! - Other events **update seq** but don't affect state
//! - Events with `seq <= last_seq` are **rejected** (stale)
//! - A name never seen is `Unregistered`; events that don't change state do not
//!   create an entry for it

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::events::{Event, EventKind};

/// Lifecycle state of a module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleState {
    /// Never loaded.
    #[default]
    Unregistered,
    /// Currently in the registry.
    Loaded,
    /// Was loaded, has since been unloaded.
    Unloaded,
}

/// Per-name state for ordering validation.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Last seen sequence number for this name.
    last_seq: u64,
    state: ModuleState,
}

/// Tracker of module lifecycle states.
pub(crate) struct LifecycleTracker {
    state: RwLock<HashMap<String, Entry>>,
}

impl LifecycleTracker {
    /// Creates a new empty tracker.
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Updates module state if the event is newer than the last one seen for it.
    ///
    /// Returns `true` if the state changed.
    ///
    /// ### State transitions
    /// - `ModuleLoaded` / `ModuleReplaced` → `Loaded`
    /// - `ModuleUnloaded` → `Unloaded`
    /// - Other events → no state change, update seq only
    pub(crate) fn update(&self, ev: &Event) -> bool {
        let name = match ev.module.as_deref() {
            Some(n) => n,
            None => return false,
        };

        let next = match ev.kind {
            EventKind::ModuleLoaded | EventKind::ModuleReplaced => Some(ModuleState::Loaded),
            EventKind::ModuleUnloaded => Some(ModuleState::Unloaded),
            _ => None,
        };

        let mut state = self.state.write();
        if next.is_none() && !state.contains_key(name) {
            return false;
        }
        let entry = state.entry(name.to_string()).or_insert(Entry {
            last_seq: 0,
            state: ModuleState::Unregistered,
        });

        if ev.seq <= entry.last_seq {
            return false;
        }
        entry.last_seq = ev.seq;

        let Some(next) = next else {
            return false;
        };
        let changed = entry.state != next;
        entry.state = next;
        changed
    }

    /// Returns the current state of `name`.
    pub(crate) fn state(&self, name: &str) -> ModuleState {
        self.state
            .read()
            .get(name)
            .map(|e| e.state)
            .unwrap_or_default()
    }

    /// Returns sorted names currently in the `Loaded` state.
    pub(crate) fn loaded(&self) -> Vec<String> {
        let state = self.state.read();
        let mut names: Vec<String> = state
            .iter()
            .filter(|(_, e)| e.state == ModuleState::Loaded)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_is_unregistered() {
        let tracker = LifecycleTracker::new();
        assert_eq!(tracker.state("nope"), ModuleState::Unregistered);
    }

    #[test]
    fn test_load_unload_reload_cycle() {
        let tracker = LifecycleTracker::new();

        assert!(tracker.update(&Event::new(EventKind::ModuleLoaded).with_module("A")));
        assert_eq!(tracker.state("A"), ModuleState::Loaded);

        assert!(tracker.update(&Event::new(EventKind::ModuleUnloaded).with_module("A")));
        assert_eq!(tracker.state("A"), ModuleState::Unloaded);

        assert!(tracker.update(&Event::new(EventKind::ModuleLoaded).with_module("A")));
        assert_eq!(tracker.loaded(), vec!["A".to_string()]);
    }

    #[test]
    fn test_stale_event_is_rejected() {
        let tracker = LifecycleTracker::new();
        let early = Event::new(EventKind::ModuleLoaded).with_module("A");
        let late = Event::new(EventKind::ModuleUnloaded).with_module("A");

        assert!(tracker.update(&late));
        assert!(!tracker.update(&early));
        assert_eq!(tracker.state("A"), ModuleState::Unloaded);
    }

    #[test]
    fn test_replace_keeps_loaded_without_change() {
        let tracker = LifecycleTracker::new();
        tracker.update(&Event::new(EventKind::ModuleLoaded).with_module("A"));
        assert!(!tracker.update(&Event::new(EventKind::ModuleReplaced).with_module("A")));
        assert_eq!(tracker.state("A"), ModuleState::Loaded);
    }

    #[test]
    fn test_non_state_events_for_unknown_names_leave_no_entry() {
        let tracker = LifecycleTracker::new();
        for i in 0..100 {
            let ghost = format!("ghost-{i}");
            assert!(!tracker.update(&Event::new(EventKind::UnloadSkipped).with_module(ghost)));
        }
        assert!(tracker.state.read().is_empty());

        tracker.update(&Event::new(EventKind::ModuleLoaded).with_module("A"));
        tracker.update(&Event::new(EventKind::CommandRan).with_module("A"));
        assert_eq!(tracker.state.read().len(), 1);
        assert_eq!(tracker.state("A"), ModuleState::Loaded);
    }
}
