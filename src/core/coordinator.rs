//! # Coordinator: owns the registry and runs connect commands as modules come and go.
//!
//! The [`Coordinator`] owns the live [`Registry`], the full set of connect commands
//! (indexed by subject), a lifecycle tracker and an [`ObserverSet`].
//!
//! ## Key responsibilities
//! - seed the registry at construction and run each seeded module's command once
//! - on load: run the module's own command, then rerun commands that depend on it
//! - on unload: strip the module's subscriptions from every loaded module, then
//!   remove it from the registry
//!
//! ## High-level architecture
//! ```text
//! build():
//!   commands ──► index by subject (DuplicateSubjectPolicy)
//!   initial modules ──► registry ──► for name in registry order:
//!                                        commands[name]?.run(snapshot)
//!
//! load_module(M):
//!   registry[M.name] = M                        ──► ModuleLoaded / ModuleReplaced
//!   commands[M.name]?.run(snapshot)             ──► CommandRan
//!   for cmd where cmd.subject != M.name
//!             and cmd.objects ∋ M.name
//!             and registry ∋ cmd.subject:
//!       cmd.run(snapshot)                       ──► CommandRan   (single hop)
//!
//! unload_module(N):
//!   N not registered                            ──► UnloadSkipped
//!   for module in registry:
//!       module.source.prune_subscriber(N)       ──► SubscriptionsPruned
//!   registry.remove(N)                          ──► ModuleUnloaded
//! ```
//!
//! ## Rules
//! - Validation failures are returned before anything is mutated.
//! - Commands and observers run with no coordinator lock held: each command gets a
//!   registry snapshot, so callbacks may reenter `load_module`/`unload_module`.
//! - Propagation is single hop: loading `M` reruns only commands that list `M` as an
//!   object, never their dependents in turn.
//! - A failing command aborts the operation and its error is returned; modules already
//!   inserted stay loaded.
//! - `load_module` and `unload_module` are serialized across threads: one runs to
//!   completion before another thread's starts. The thread already inside an operation
//!   may reenter (a command or handler calling `unload_module` is fine).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{ReentrantMutex, RwLock};
use tracing::debug;

use super::builder::CoordinatorBuilder;
use super::lifecycle::{LifecycleTracker, ModuleState};
use super::registry::Registry;
use crate::commands::CommandRef;
use crate::core::CoordinatorConfig;
use crate::error::{Error, ValidationError};
use crate::events::{Event, EventKind};
use crate::modules::Module;
use crate::observers::ObserverSet;

/// Wires modules together by running connect commands, and unwires them on unload.
pub struct Coordinator {
    cfg: CoordinatorConfig,
    commands: IndexMap<Arc<str>, CommandRef>,
    registry: RwLock<Registry>,
    lifecycle: LifecycleTracker,
    observers: ObserverSet,
    /// Serializes load/unload across threads.
    ops: ReentrantMutex<()>,
}

impl Coordinator {
    /// Returns a builder for a coordinator with the given configuration.
    pub fn builder(cfg: CoordinatorConfig) -> CoordinatorBuilder {
        CoordinatorBuilder::new(cfg)
    }

    /// Builds a coordinator with the default configuration.
    ///
    /// Shorthand for `Coordinator::builder(CoordinatorConfig::default())
    /// .with_commands(commands).with_initial_modules(initial_modules).build()`.
    pub fn new(
        commands: Vec<CommandRef>,
        initial_modules: Vec<Arc<dyn Module>>,
    ) -> Result<Self, Error> {
        Self::builder(CoordinatorConfig::default())
            .with_commands(commands)
            .with_initial_modules(initial_modules)
            .build()
    }

    pub(crate) fn new_internal(
        cfg: CoordinatorConfig,
        commands: IndexMap<Arc<str>, CommandRef>,
        observers: ObserverSet,
    ) -> Self {
        Self {
            cfg,
            commands,
            registry: RwLock::new(Registry::new()),
            lifecycle: LifecycleTracker::new(),
            observers,
            ops: ReentrantMutex::new(()),
        }
    }

    /// Loads the initial modules and runs each one's own command once, in registry order.
    pub(crate) fn seed(&self, modules: Vec<Arc<dyn Module>>) -> Result<(), Error> {
        let _op = self.ops.lock();
        for module in modules {
            self.insert(module);
        }

        let names = self.registry.read().names();
        for name in names {
            if let Some(cmd) = self.commands.get(&name) {
                self.run_command(cmd, &name)?;
            }
        }
        Ok(())
    }

    /// Wires `module` into the application.
    ///
    /// Adds (or overwrites) the module under its name, runs the command whose subject
    /// is that name, then reruns every other command that lists the name among its
    /// objects and whose own subject is loaded.
    ///
    /// ### Errors
    /// - [`ValidationError::MissingModuleName`] if the module's name is empty.
    /// - Any error returned by a connect command.
    pub fn load_module(&self, module: Arc<dyn Module>) -> Result<(), Error> {
        if module.name().is_empty() {
            return Err(ValidationError::MissingModuleName.into());
        }
        let _op = self.ops.lock();
        let name: Arc<str> = Arc::from(module.name());
        self.insert(module);

        if let Some(cmd) = self.commands.get(&name) {
            self.run_command(cmd, &name)?;
        }

        for (subject, cmd) in &self.commands {
            if *subject == name || !cmd.depends_on(&name) {
                continue;
            }
            let subject_loaded = self.registry.read().contains(subject);
            if !subject_loaded {
                debug!(subject = %subject, trigger = %name, "dependent command skipped: subject not loaded");
                continue;
            }
            self.run_command(cmd, &name)?;
        }
        Ok(())
    }

    /// Removes the module named `name` and every subscription it holds on loaded modules.
    ///
    /// Unloading a name that is not registered is a no-op.
    ///
    /// ### Errors
    /// - [`ValidationError::MissingModuleName`] if `name` is empty.
    pub fn unload_module(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::MissingModuleName);
        }

        let _op = self.ops.lock();
        let snapshot = self.registry.read().clone();
        if !snapshot.contains(name) {
            debug!(module = name, "unload skipped: not registered");
            self.emit(Event::new(EventKind::UnloadSkipped).with_module(name));
            return Ok(());
        }

        let mut pruned = 0;
        for (module_name, module) in snapshot.iter() {
            let removed = module.source().prune_subscriber(name);
            if removed > 0 {
                self.emit(
                    Event::new(EventKind::SubscriptionsPruned)
                        .with_module(module_name)
                        .with_reason(name)
                        .with_count(removed),
                );
            }
            pruned += removed;
        }

        self.registry.write().remove(name);
        debug!(module = name, pruned, "module unloaded");
        self.emit(
            Event::new(EventKind::ModuleUnloaded)
                .with_module(name)
                .with_count(pruned),
        );
        Ok(())
    }

    /// Returns a snapshot of the registry (which modules are currently loaded).
    pub fn registry(&self) -> Registry {
        self.registry.read().clone()
    }

    /// Returns the module registered under `name`.
    pub fn module(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.registry.read().get(name).cloned()
    }

    /// Returns the module registered under `name` as its concrete type.
    pub fn module_as<M: Module>(&self, name: &str) -> Option<Arc<M>> {
        self.registry.read().get_as::<M>(name)
    }

    /// Returns true if a module named `name` is currently registered.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.registry.read().contains(name)
    }

    /// Returns the lifecycle state of `name`.
    pub fn state(&self, name: &str) -> ModuleState {
        self.lifecycle.state(name)
    }

    /// Returns sorted names of modules in the `Loaded` state.
    pub fn loaded(&self) -> Vec<String> {
        self.lifecycle.loaded()
    }

    /// Returns the subjects of the indexed commands, in index order.
    pub fn subjects(&self) -> Vec<&str> {
        self.commands.keys().map(|s| &**s).collect()
    }

    /// Returns the command indexed under `subject`.
    pub fn command(&self, subject: &str) -> Option<&CommandRef> {
        self.commands.get(subject)
    }

    /// Returns the configuration the coordinator was built with.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.cfg
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    /// Inserts `module` and reports whether it was new or replaced an instance.
    fn insert(&self, module: Arc<dyn Module>) {
        let name: Arc<str> = Arc::from(module.name());
        let replaced = self.registry.write().insert(module).is_some();

        let kind = if replaced {
            EventKind::ModuleReplaced
        } else {
            EventKind::ModuleLoaded
        };
        debug!(module = %name, replaced, "module loaded");
        self.emit(Event::new(kind).with_module(name));
    }

    /// Runs `cmd` against a fresh registry snapshot and reports the outcome.
    fn run_command(&self, cmd: &CommandRef, trigger: &str) -> Result<(), Error> {
        let snapshot = self.registry.read().clone();
        let subject = cmd.subject();

        match cmd.run(&snapshot) {
            Ok(()) => {
                debug!(subject, trigger, "connect command ran");
                self.emit(
                    Event::new(EventKind::CommandRan)
                        .with_command(subject)
                        .with_module(trigger),
                );
                Ok(())
            }
            Err(err) => {
                debug!(subject, trigger, error = %err, "connect command failed");
                self.emit(
                    Event::new(EventKind::CommandFailed)
                        .with_command(subject)
                        .with_module(trigger)
                        .with_reason(err.as_message()),
                );
                Err(err)
            }
        }
    }

    fn emit(&self, ev: Event) {
        self.lifecycle.update(&ev);
        self.observers.emit(&ev);
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("cfg", &self.cfg)
            .field("subjects", &self.subjects())
            .field("registry", &*self.registry.read())
            .field("observers", &self.observers.len())
            .finish()
    }
}
