//! # Duplicate subject policy
//!
//! The coordinator indexes connect commands by subject name. When two supplied
//! commands name the same subject, this policy decides what happens.
//!
//! ## Variants
//! - `Reject`: construction fails with
//!   [`ConfigurationError::DuplicateSubject`](crate::ConfigurationError::DuplicateSubject) (default).
//! - `LastWins`: the later command replaces the earlier one.
//!
//! ## Invariants
//! - At most one command is indexed per subject.
//! - Under `LastWins` the surviving command keeps the index position of the first
//!   command with that subject, so command iteration order is stable.

/// Policy controlling how commands sharing a subject are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateSubjectPolicy {
    /// Refuse to build the coordinator.
    ///
    /// Use when:
    /// - Commands come from several independently maintained places
    /// - A silently dropped command would be a bug
    #[default]
    Reject,

    /// Keep the command supplied last.
    ///
    /// Use when:
    /// - Later configuration layers are meant to override earlier ones
    LastWins,
}
