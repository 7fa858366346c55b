//! Module descriptors: the explicit registration list the orchestrator is built from.

use crate::module::{Module, ModuleType};
use std::fmt;

/// Boxed module as stored by the registry.
pub type BoxedModule<C> = Box<dyn Module<Context = C>>;

type Factory<C> = Box<dyn Fn() -> BoxedModule<C> + Send + Sync>;

/// Name, optional priority and factory for one module.
///
/// Descriptors are cheap to declare up front, usually as a `Vec` returned by a single
/// registration function. No instance exists until the registry is built.
pub struct ModuleDescriptor<C> {
    pub(crate) name: &'static str,
    pub(crate) priority: Option<i32>,
    pub(crate) factory: Factory<C>,
}

impl<C: Send + Sync + 'static> ModuleDescriptor<C> {
    /// Describes a default-constructible module type using its static metadata.
    pub fn of<M>() -> Self
    where
        M: ModuleType<Context = C>,
    {
        Self {
            name: M::NAME,
            priority: M::PRIORITY,
            factory: Box::new(|| Box::new(M::default()) as BoxedModule<C>),
        }
    }

    /// Describes a module built by an arbitrary factory.
    pub fn new<F>(name: &'static str, priority: Option<i32>, factory: F) -> Self
    where
        F: Fn() -> BoxedModule<C> + Send + Sync + 'static,
    {
        Self {
            name,
            priority,
            factory: Box::new(factory),
        }
    }
}

impl<C> ModuleDescriptor<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub(crate) fn instantiate(&self) -> BoxedModule<C> {
        (self.factory)()
    }
}

impl<C> fmt::Debug for ModuleDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
