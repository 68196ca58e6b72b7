//! # Subscription registration builder.
//!
//! ```text
//! source.subscribe("error")?      ─► Subscribe  (event validated)
//!       .notify(&subscriber)?     ─► Notify<M>  (subscriber name validated)
//!       .by_calling("on_error")?  ─► registered (handler resolved, idempotent)
//! ```
//!
//! The registered callback holds a weak reference to the subscriber, so wiring
//! never keeps a module alive. A callback whose subscriber has been dropped does nothing.

use std::any::Any;
use std::sync::Arc;

use tracing::trace;

use crate::error::{ContractError, Error, ValidationError};
use crate::modules::{Args, Module};
use crate::source::event_source::{Callback, EventSource, Subscription};

/// First stage: the event is chosen, the subscriber is not.
#[must_use = "a subscription is only registered by `notify(..).by_calling(..)`"]
pub struct Subscribe<'a> {
    source: &'a EventSource,
    event: Arc<str>,
}

impl<'a> Subscribe<'a> {
    pub(crate) fn new(source: &'a EventSource, event: Arc<str>) -> Self {
        Self { source, event }
    }

    /// Chooses the module to notify.
    ///
    /// Fails with [`ValidationError::MissingSubscriber`] if the subscriber's stable
    /// name is empty.
    pub fn notify<M: Module>(self, subscriber: &Arc<M>) -> Result<Notify<'a, M>, ValidationError> {
        if subscriber.name().is_empty() {
            return Err(ValidationError::MissingSubscriber);
        }
        Ok(Notify {
            source: self.source,
            event: self.event,
            subscriber: Arc::clone(subscriber),
        })
    }
}

/// Second stage: event and subscriber chosen, handler pending.
#[must_use = "a subscription is only registered by `by_calling(..)`"]
pub struct Notify<'a, M: Module> {
    source: &'a EventSource,
    event: Arc<str>,
    subscriber: Arc<M>,
}

impl<M: Module> Notify<'_, M> {
    /// Registers `subscriber.<method>` as a callback for the event.
    ///
    /// ### Errors
    /// - [`ValidationError::MissingHandlerName`] if `method` is empty.
    /// - [`ContractError::UnknownHandler`] if the subscriber does not resolve `method`.
    ///
    /// Registering the same `(subscriber, method)` again has no additional effect.
    pub fn by_calling(self, method: &str) -> Result<(), Error> {
        if method.is_empty() {
            return Err(ValidationError::MissingHandlerName.into());
        }
        let handler = self
            .subscriber
            .handler(method)
            .ok_or_else(|| ContractError::UnknownHandler {
                subscriber: self.subscriber.name().to_string(),
                handler: method.to_string(),
            })?;

        let weak = Arc::downgrade(&self.subscriber);
        let callback: Callback = Arc::new(move |args: &Args| {
            if let Some(target) = weak.upgrade() {
                handler(target.as_ref(), args);
            }
        });

        let instance: Arc<dyn Any + Send + Sync> = self.subscriber.clone();
        let sub = Subscription {
            subscriber: Arc::from(self.subscriber.name()),
            handler: Arc::from(method),
            instance: Arc::downgrade(&instance),
            callback,
        };

        let outcome = self.source.register(Arc::clone(&self.event), sub);
        trace!(event = %self.event, handler = method, ?outcome, "by_calling");
        Ok(())
    }
}
