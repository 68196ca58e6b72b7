//! # Coordinator policies.
//!
//! | Policy                       | Purpose                                           |
//! |------------------------------|---------------------------------------------------|
//! | [`DuplicateSubjectPolicy`]   | What to do when two commands share a subject name |

mod duplicate;

pub use duplicate::DuplicateSubjectPolicy;
