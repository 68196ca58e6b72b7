//! # Per-module event source.
//!
//! [`EventSource`] holds, per event name, an ordered list of subscriptions and
//! dispatches published events to them synchronously.
//!
//! ## Architecture
//! ```text
//! publish(event, args)
//!     │
//!     ├─► read lock ─► snapshot callbacks for `event` ─► unlock
//!     │
//!     └─► callback 1(args) ─► callback 2(args) ─► ... (registration order)
//! ```
//!
//! ## Rules
//! - Delivery is synchronous and in registration order.
//! - Publishing an event nobody subscribed to is a no-op.
//! - Dispatch iterates a snapshot: subscriptions added by a callback are not invoked
//!   by the current dispatch, subscriptions removed by a callback still are.
//! - A subscription is identified by `(subscriber, handler)`; registering the same
//!   identity bound to the same subscriber instance twice has no effect.
//! - No lock is held while callbacks run, so callbacks may publish, subscribe or
//!   drive the coordinator.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::modules::Args;
use crate::source::Subscribe;

/// Callback invoked with the published arguments.
pub(crate) type Callback = Arc<dyn Fn(&Args) + Send + Sync>;

/// One registered subscription on one event.
#[derive(Clone)]
pub(crate) struct Subscription {
    /// Stable name of the subscribing module.
    pub(crate) subscriber: Arc<str>,
    /// Name of the handler the callback was resolved from.
    pub(crate) handler: Arc<str>,
    /// Subscriber instance the callback is bound to (identity only).
    pub(crate) instance: Weak<dyn Any + Send + Sync>,
    pub(crate) callback: Callback,
}

impl Subscription {
    fn same_target(&self, other: &Subscription) -> bool {
        self.subscriber == other.subscriber && self.handler == other.handler
    }
}

/// Read-only view of a subscription, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInfo {
    /// Stable name of the subscribing module.
    pub subscriber: Arc<str>,
    /// Handler invoked on the subscriber.
    pub handler: Arc<str>,
}

/// Outcome of registering a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registered {
    Added,
    AlreadyPresent,
    Rebound,
}

/// Publish/subscribe capability embedded in every module.
pub struct EventSource {
    subscriptions: RwLock<HashMap<Arc<str>, Vec<Subscription>>>,
    declared: Option<HashSet<Arc<str>>>,
}

impl EventSource {
    /// Creates a source that accepts any non-empty event name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            declared: None,
        }
    }

    /// Creates a source with a declared event catalogue.
    ///
    /// Publishing or subscribing to an event outside the catalogue fails with
    /// [`ValidationError::UnknownEvent`].
    ///
    /// ## Example
    /// ```rust
    /// use eventwire::{EventSource, ValidationError};
    ///
    /// let source = EventSource::with_events(&["click"]);
    /// assert!(source.publish("click", &[]).is_ok());
    /// assert!(matches!(
    ///     source.publish("hover", &[]),
    ///     Err(ValidationError::UnknownEvent { .. })
    /// ));
    /// ```
    #[must_use]
    pub fn with_events(events: &[&str]) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            declared: Some(events.iter().map(|e| Arc::from(*e)).collect()),
        }
    }

    /// Returns the declared catalogue, if any (sorted).
    pub fn declared_events(&self) -> Option<Vec<Arc<str>>> {
        self.declared.as_ref().map(|set| {
            let mut events: Vec<Arc<str>> = set.iter().cloned().collect();
            events.sort_unstable();
            events
        })
    }

    /// Invokes every callback subscribed to `event`, in registration order,
    /// passing `args` unchanged.
    ///
    /// Fails with [`ValidationError::MissingEvent`] if `event` is empty.
    pub fn publish(&self, event: &str, args: &Args) -> Result<(), ValidationError> {
        self.check_event(event)?;

        let callbacks: Vec<Callback> = {
            let subs = self.subscriptions.read();
            match subs.get(event) {
                Some(list) => list.iter().map(|s| Arc::clone(&s.callback)).collect(),
                None => return Ok(()),
            }
        };

        trace!(event, subscribers = callbacks.len(), "dispatching event");
        for cb in callbacks {
            cb(args);
        }
        Ok(())
    }

    /// Starts registering a subscription to `event`.
    ///
    /// Fails with [`ValidationError::MissingEvent`] if `event` is empty.
    /// Continue with [`Subscribe::notify`] and [`Notify::by_calling`](crate::Notify::by_calling).
    pub fn subscribe(&self, event: &str) -> Result<Subscribe<'_>, ValidationError> {
        self.check_event(event)?;
        Ok(Subscribe::new(self, Arc::from(event)))
    }

    /// Returns the number of subscriptions registered for `event`.
    pub fn subscription_count(&self, event: &str) -> usize {
        self.subscriptions.read().get(event).map_or(0, Vec::len)
    }

    /// Returns the subscriptions for `event` in registration order.
    pub fn subscriptions(&self, event: &str) -> Vec<SubscriptionInfo> {
        self.subscriptions
            .read()
            .get(event)
            .map(|list| {
                list.iter()
                    .map(|s| SubscriptionInfo {
                        subscriber: Arc::clone(&s.subscriber),
                        handler: Arc::clone(&s.handler),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns sorted names of events that currently have at least one subscription.
    pub fn events(&self) -> Vec<Arc<str>> {
        let subs = self.subscriptions.read();
        let mut events: Vec<Arc<str>> = subs
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(event, _)| Arc::clone(event))
            .collect();
        events.sort_unstable();
        events
    }

    /// Returns the number of subscriptions across all events.
    pub fn total_subscriptions(&self) -> usize {
        self.subscriptions.read().values().map(Vec::len).sum()
    }

    /// Adds `sub` under `event` unless the same `(subscriber, handler)` is present.
    ///
    /// An existing entry bound to a different subscriber instance is rebound in place.
    pub(crate) fn register(&self, event: Arc<str>, sub: Subscription) -> Registered {
        let mut subs = self.subscriptions.write();
        let list = subs.entry(Arc::clone(&event)).or_default();

        if let Some(existing) = list.iter_mut().find(|s| s.same_target(&sub)) {
            if Weak::ptr_eq(&existing.instance, &sub.instance) {
                return Registered::AlreadyPresent;
            }
            debug!(
                event = %event,
                subscriber = %sub.subscriber,
                handler = %sub.handler,
                "rebinding subscription to new instance"
            );
            *existing = sub;
            return Registered::Rebound;
        }

        debug!(
            event = %event,
            subscriber = %sub.subscriber,
            handler = %sub.handler,
            "subscription added"
        );
        list.push(sub);
        Registered::Added
    }

    /// Removes every subscription whose subscriber is `name`; returns how many were removed.
    pub(crate) fn prune_subscriber(&self, name: &str) -> usize {
        let mut subs = self.subscriptions.write();
        let mut removed = 0;
        for list in subs.values_mut() {
            let before = list.len();
            list.retain(|s| &*s.subscriber != name);
            removed += before - list.len();
        }
        removed
    }

    fn check_event(&self, event: &str) -> Result<(), ValidationError> {
        if event.is_empty() {
            return Err(ValidationError::MissingEvent);
        }
        match &self.declared {
            Some(declared) if !declared.contains(event) => Err(ValidationError::UnknownEvent {
                event: event.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("events", &self.events())
            .field("subscriptions", &self.total_subscriptions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn sub(subscriber: &str, handler: &str, instance: &Arc<()>, cb: Callback) -> Subscription {
        let instance: Arc<dyn Any + Send + Sync> = instance.clone();
        Subscription {
            subscriber: Arc::from(subscriber),
            handler: Arc::from(handler),
            instance: Arc::downgrade(&instance),
            callback: cb,
        }
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Callback {
        let log = Arc::clone(log);
        Arc::new(move |args: &Args| log.lock().push(format!("{tag}:{}", args.len())))
    }

    #[test]
    fn test_publish_empty_event_is_rejected() {
        let source = EventSource::new();
        assert_eq!(source.publish("", &[]), Err(ValidationError::MissingEvent));
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let source = EventSource::new();
        assert!(source.publish("nobody-listens", &[json!(1)]).is_ok());
    }

    #[test]
    fn test_publish_invokes_in_registration_order_with_args() {
        let source = EventSource::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Arc::new(());

        source.register(Arc::from("evt"), sub("A", "h", &owner, recorder(&log, "a")));
        source.register(Arc::from("evt"), sub("B", "h", &owner, recorder(&log, "b")));

        source.publish("evt", &[json!("foo"), json!(1)]).unwrap();
        assert_eq!(*log.lock(), vec!["a:2".to_string(), "b:2".to_string()]);
    }

    #[test]
    fn test_register_same_target_twice_is_idempotent() {
        let source = EventSource::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Arc::new(());

        let first = source.register(Arc::from("evt"), sub("A", "h", &owner, recorder(&log, "a")));
        let second = source.register(Arc::from("evt"), sub("A", "h", &owner, recorder(&log, "a")));

        assert_eq!(first, Registered::Added);
        assert_eq!(second, Registered::AlreadyPresent);
        assert_eq!(source.subscription_count("evt"), 1);
    }

    #[test]
    fn test_register_new_instance_rebinds_in_place() {
        let source = EventSource::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let old = Arc::new(());
        let new = Arc::new(());

        source.register(Arc::from("evt"), sub("A", "h", &old, recorder(&log, "old")));
        source.register(Arc::from("evt"), sub("B", "h", &old, recorder(&log, "b")));
        let outcome = source.register(Arc::from("evt"), sub("A", "h", &new, recorder(&log, "new")));

        assert_eq!(outcome, Registered::Rebound);
        source.publish("evt", &[]).unwrap();
        assert_eq!(*log.lock(), vec!["new:0".to_string(), "b:0".to_string()]);
    }

    #[test]
    fn test_prune_removes_only_named_subscriber() {
        let source = EventSource::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Arc::new(());

        source.register(Arc::from("x"), sub("A", "h1", &owner, recorder(&log, "a1")));
        source.register(Arc::from("y"), sub("A", "h2", &owner, recorder(&log, "a2")));
        source.register(Arc::from("y"), sub("B", "h", &owner, recorder(&log, "b")));

        assert_eq!(source.prune_subscriber("A"), 2);
        assert_eq!(source.subscription_count("x"), 0);
        assert_eq!(source.subscription_count("y"), 1);
        assert_eq!(source.prune_subscriber("A"), 0);
        assert_eq!(source.events(), vec![Arc::<str>::from("y")]);
    }

    #[test]
    fn test_declared_catalogue_rejects_unknown_events() {
        let source = EventSource::with_events(&["click"]);
        assert!(source.subscribe("click").is_ok());
        assert_eq!(
            source.subscribe("hover").err(),
            Some(ValidationError::UnknownEvent {
                event: "hover".into()
            })
        );
        assert_eq!(source.publish("", &[]), Err(ValidationError::MissingEvent));
    }

    #[test]
    fn test_callback_subscribing_during_dispatch_is_not_invoked_by_same_dispatch() {
        let source = Arc::new(EventSource::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Arc::new(());

        let late = recorder(&log, "late");
        let src = Arc::clone(&source);
        let owner_for_cb = Arc::clone(&owner);
        let log_for_cb = Arc::clone(&log);
        let first: Callback = Arc::new(move |_args: &Args| {
            log_for_cb.lock().push("first".into());
            src.register(
                Arc::from("evt"),
                sub("Late", "h", &owner_for_cb, Arc::clone(&late)),
            );
        });

        source.register(Arc::from("evt"), sub("First", "h", &owner, first));
        source.publish("evt", &[]).unwrap();
        assert_eq!(*log.lock(), vec!["first".to_string()]);

        source.publish("evt", &[]).unwrap();
        assert_eq!(
            *log.lock(),
            vec!["first".to_string(), "first".to_string(), "late:0".to_string()]
        );
    }

    #[test]
    fn test_declared_events_are_sorted() {
        let source = EventSource::with_events(&["error", "click"]);
        assert_eq!(
            source.declared_events(),
            Some(vec![Arc::<str>::from("click"), Arc::<str>::from("error")])
        );
        assert_eq!(EventSource::new().declared_events(), None);
    }
}
