//! # Module registry - live mapping from module name to module instance.
//!
//! The [`Coordinator`](crate::Coordinator) exclusively owns and mutates the registry.
//! Everyone else (connect commands, diagnostics) sees read-only snapshots.
//!
//! ## Rules
//! - Names are unique; inserting an existing name replaces the instance in place
//!   (iteration position is kept).
//! - Iteration follows insertion order.
//! - Cloning is cheap: modules are shared `Arc` handles.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::modules::Module;

/// Keyed, insertion-ordered collection of loaded modules.
#[derive(Clone, Default)]
pub struct Registry {
    modules: IndexMap<Arc<str>, Arc<dyn Module>>,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the module registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.get(name)
    }

    /// Returns the module registered under `name` as its concrete type.
    ///
    /// `None` if nothing is registered under `name` or it is not an `M`.
    pub fn get_as<M: Module>(&self, name: &str) -> Option<Arc<M>> {
        let module = Arc::clone(self.modules.get(name)?);
        module.into_any().downcast::<M>().ok()
    }

    /// Returns true if a module is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Returns registered names in insertion order.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.modules.keys().cloned().collect()
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates `(name, module)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Module>)> {
        self.modules.iter().map(|(name, m)| (&**name, m))
    }

    /// Calls `f` for every registered module, in insertion order.
    pub fn for_each_module(&self, mut f: impl FnMut(&str, &Arc<dyn Module>)) {
        for (name, module) in &self.modules {
            f(name, module);
        }
    }

    /// Inserts `module` under its own name; returns the instance it replaced.
    pub(crate) fn insert(&mut self, module: Arc<dyn Module>) -> Option<Arc<dyn Module>> {
        let name: Arc<str> = Arc::from(module.name());
        self.modules.insert(name, module)
    }

    /// Removes `name`, keeping the order of the remaining entries.
    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<dyn Module>> {
        self.modules.shift_remove(name)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::EventSource;

    struct Plain {
        name: &'static str,
        source: EventSource,
    }

    impl Plain {
        fn arc(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                source: EventSource::new(),
            })
        }
    }

    impl Module for Plain {
        fn name(&self) -> &str {
            self.name
        }
        fn source(&self) -> &EventSource {
            &self.source
        }
    }

    struct Other {
        source: EventSource,
    }

    impl Module for Other {
        fn name(&self) -> &str {
            "Other"
        }
        fn source(&self) -> &EventSource {
            &self.source
        }
    }

    #[test]
    fn test_insert_keeps_insertion_order_and_replaces_in_place() {
        let mut reg = Registry::new();
        reg.insert(Plain::arc("b"));
        reg.insert(Plain::arc("a"));
        let replaced = reg.insert(Plain::arc("b"));

        assert!(replaced.is_some());
        assert_eq!(reg.len(), 2);
        let names: Vec<&str> = reg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_get_as_downcasts_to_concrete_type() {
        let mut reg = Registry::new();
        let plain = Plain::arc("p");
        reg.insert(plain.clone());
        reg.insert(Arc::new(Other {
            source: EventSource::new(),
        }));

        let got = reg.get_as::<Plain>("p").unwrap();
        assert!(Arc::ptr_eq(&got, &plain));
        assert!(reg.get_as::<Plain>("Other").is_none());
        assert!(reg.get_as::<Plain>("missing").is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = Registry::new();
        reg.insert(Plain::arc("x"));
        assert!(reg.remove("x").is_some());
        assert!(reg.remove("x").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_for_each_module_visits_in_insertion_order() {
        let mut reg = Registry::new();
        reg.insert(Plain::arc("c"));
        reg.insert(Plain::arc("a"));
        reg.insert(Plain::arc("b"));
        reg.remove("a");

        let mut seen = Vec::new();
        reg.for_each_module(|name, module| {
            assert_eq!(name, module.name());
            seen.push(name.to_string());
        });
        assert_eq!(seen, vec!["c", "b"]);
    }
}
