//! # Coordinator configuration.
//!
//! Provides [`CoordinatorConfig`], the settings for the connection coordinator.
//!
//! Config is passed to [`Coordinator::builder`](crate::Coordinator::builder);
//! [`Coordinator::new`](crate::Coordinator::new) uses [`CoordinatorConfig::default`].

use crate::policies::DuplicateSubjectPolicy;

/// Configuration for the connection coordinator.
///
/// ## Field semantics
/// - `duplicate_subjects`: what to do when two commands configure the same subject
///
/// ## Notes
/// All fields are public for flexibility.
#[derive(Clone, Debug, Default)]
pub struct CoordinatorConfig {
    /// Handling of connect commands that share a subject name.
    ///
    /// Default: [`DuplicateSubjectPolicy::Reject`].
    pub duplicate_subjects: DuplicateSubjectPolicy,
}

impl CoordinatorConfig {
    /// Returns a config that keeps the last command supplied for each subject.
    #[must_use]
    pub fn last_wins() -> Self {
        Self {
            duplicate_subjects: DuplicateSubjectPolicy::LastWins,
        }
    }
}
