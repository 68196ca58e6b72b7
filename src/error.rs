//! Error types raised by event sources, connect commands and the coordinator.
//!
//! The taxonomy has three kinds, each its own enum:
//!
//! - [`ValidationError`]: a required argument is absent or empty.
//! - [`ConfigurationError`]: a supplied connect command is malformed.
//! - [`ContractError`]: a subscriber does not provide the named handler.
//!
//! [`Error`] wraps all three for operations that can fail in more than one way.
//! Every error is raised synchronously to the immediate caller and is meant to be
//! treated as a programmer error, not a transient condition.
//!
//! All types provide `as_label` (stable snake_case label for logs/metrics).

use thiserror::Error;

/// # A required argument was absent or empty.
///
/// Raised before any state is mutated.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Event name was empty.
    #[error("event not supplied")]
    MissingEvent,

    /// Subscriber has no stable name.
    #[error("subscriber not supplied")]
    MissingSubscriber,

    /// Handler (method) name was empty.
    #[error("handler name not supplied")]
    MissingHandlerName,

    /// Module (or module name argument) has an empty stable name.
    #[error("module name not supplied")]
    MissingModuleName,

    /// Coordinator was built without connect commands.
    #[error("connect commands not supplied")]
    NoCommands,

    /// Event is not part of the source's declared catalogue.
    #[error("event {event:?} is not declared by this source")]
    UnknownEvent {
        /// The rejected event name.
        event: String,
    },
}

impl ValidationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventwire::ValidationError;
    ///
    /// assert_eq!(ValidationError::MissingEvent.as_label(), "missing_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ValidationError::MissingEvent => "missing_event",
            ValidationError::MissingSubscriber => "missing_subscriber",
            ValidationError::MissingHandlerName => "missing_handler_name",
            ValidationError::MissingModuleName => "missing_module_name",
            ValidationError::NoCommands => "no_commands",
            ValidationError::UnknownEvent { .. } => "unknown_event",
        }
    }
}

/// # A connect command handed to the coordinator is malformed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Command at `index` has an empty subject name.
    #[error("connect command #{index} is missing its subject name")]
    MissingSubject {
        /// Position of the command in the supplied list.
        index: usize,
    },

    /// Two commands configure the same subject and the duplicate policy rejects it.
    #[error("more than one connect command configures subject {subject:?}")]
    DuplicateSubject {
        /// The subject both commands name.
        subject: String,
    },
}

impl ConfigurationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigurationError::MissingSubject { .. } => "missing_subject",
            ConfigurationError::DuplicateSubject { .. } => "duplicate_subject",
        }
    }
}

/// # A subscriber cannot honour the requested handler.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The subscriber's handler table does not resolve `handler`.
    #[error("subscriber {subscriber:?} has no handler named {handler:?}")]
    UnknownHandler {
        /// Stable name of the subscriber.
        subscriber: String,
        /// The handler name that failed to resolve.
        handler: String,
    },
}

impl ContractError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ContractError::UnknownHandler { .. } => "unknown_handler",
        }
    }
}

/// # Any error raised while wiring modules.
///
/// Returned by operations that validate input *and* run connect commands
/// (coordinator construction, [`load_module`](crate::Coordinator::load_module),
/// [`ConnectCommand::run`](crate::ConnectCommand::run), subscription registration).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// See [`ContractError`].
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl Error {
    /// Returns the label of the wrapped error.
    ///
    /// # Example
    /// ```
    /// use eventwire::{ConfigurationError, Error};
    ///
    /// let err = Error::from(ConfigurationError::MissingSubject { index: 2 });
    /// assert_eq!(err.as_label(), "missing_subject");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::Validation(e) => e.as_label(),
            Error::Configuration(e) => e.as_label(),
            Error::Contract(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message prefixed with the error kind.
    ///
    /// # Example
    /// ```
    /// use eventwire::{Error, ValidationError};
    ///
    /// let err = Error::from(ValidationError::NoCommands);
    /// assert_eq!(err.as_message(), "validation: connect commands not supplied");
    /// ```
    pub fn as_message(&self) -> String {
        match self {
            Error::Validation(e) => format!("validation: {e}"),
            Error::Configuration(e) => format!("configuration: {e}"),
            Error::Contract(e) => format!("contract: {e}"),
        }
    }

    /// Returns `true` for [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns `true` for [`Error::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Returns `true` for [`Error::Contract`].
    pub fn is_contract(&self) -> bool {
        matches!(self, Error::Contract(_))
    }
}
