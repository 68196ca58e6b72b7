use std::sync::Arc;

use indexmap::IndexMap;

use super::coordinator::Coordinator;
use crate::{
    commands::CommandRef,
    core::CoordinatorConfig,
    error::{ConfigurationError, Error, ValidationError},
    modules::Module,
    observers::{Observe, ObserverSet},
    policies::DuplicateSubjectPolicy,
};

/// Builder for constructing a [`Coordinator`].
pub struct CoordinatorBuilder {
    cfg: CoordinatorConfig,
    commands: Vec<CommandRef>,
    initial_modules: Vec<Arc<dyn Module>>,
    observers: Vec<Arc<dyn Observe>>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: CoordinatorConfig) -> Self {
        Self {
            cfg,
            commands: Vec::new(),
            initial_modules: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Sets the connect commands. At least one is required.
    pub fn with_commands(mut self, commands: Vec<CommandRef>) -> Self {
        self.commands = commands;
        self
    }

    /// Sets the modules loaded while building.
    ///
    /// A later module with the same name overwrites an earlier one.
    pub fn with_initial_modules(mut self, modules: Vec<Arc<dyn Module>>) -> Self {
        self.initial_modules = modules;
        self
    }

    /// Sets observers for coordinator events.
    ///
    /// Observers see the events produced while seeding the initial modules too.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds the coordinator, seeds the registry and runs eligible commands once.
    ///
    /// ### Errors
    /// - [`ValidationError::NoCommands`] if no command was supplied.
    /// - [`ConfigurationError::MissingSubject`] if a command has an empty subject.
    /// - [`ConfigurationError::DuplicateSubject`] if two commands share a subject and
    ///   the config's policy is [`DuplicateSubjectPolicy::Reject`].
    /// - [`ValidationError::MissingModuleName`] if an initial module has an empty name.
    /// - Any error returned by a connect command during seeding.
    ///
    /// Validation happens before anything is loaded.
    pub fn build(self) -> Result<Coordinator, Error> {
        let commands = index_commands(self.commands, self.cfg.duplicate_subjects)?;

        if self.initial_modules.iter().any(|m| m.name().is_empty()) {
            return Err(ValidationError::MissingModuleName.into());
        }

        let coordinator =
            Coordinator::new_internal(self.cfg, commands, ObserverSet::new(self.observers));
        coordinator.seed(self.initial_modules)?;
        Ok(coordinator)
    }
}

/// Indexes commands by subject, applying the duplicate policy.
fn index_commands(
    commands: Vec<CommandRef>,
    policy: DuplicateSubjectPolicy,
) -> Result<IndexMap<Arc<str>, CommandRef>, Error> {
    if commands.is_empty() {
        return Err(ValidationError::NoCommands.into());
    }

    let mut index: IndexMap<Arc<str>, CommandRef> = IndexMap::with_capacity(commands.len());
    for (i, cmd) in commands.into_iter().enumerate() {
        let subject = cmd.subject();
        if subject.is_empty() {
            return Err(ConfigurationError::MissingSubject { index: i }.into());
        }
        if index.contains_key(subject) && policy == DuplicateSubjectPolicy::Reject {
            return Err(ConfigurationError::DuplicateSubject {
                subject: subject.to_string(),
            }
            .into());
        }
        let key: Arc<str> = Arc::from(subject);
        index.insert(key, cmd);
    }
    Ok(index)
}
