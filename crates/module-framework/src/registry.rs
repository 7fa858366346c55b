//! # Module Registry
//!
//! Turns a list of [`ModuleDescriptor`]s into the ordered set of live module instances.
//!
//! ## Build Steps
//!
//! 1. Instantiate one module per descriptor (the factory takes no arguments).
//! 2. Resolve the priority: the descriptor's own value, or the configured default.
//! 3. Stable-sort ascending by priority. Equal priorities keep discovery order.
//!
//! The resulting order never changes afterwards. The orchestrator iterates it forwards for
//! init and update and backwards for release.

use crate::descriptor::{BoxedModule, ModuleDescriptor};
use crate::error::FrameworkError;
use crate::module::ModuleState;
use std::collections::HashSet;
use tracing::info;

/// One registered module with its resolved priority and lifecycle state.
pub struct ModuleSlot<C> {
    pub(crate) name: &'static str,
    pub(crate) priority: i32,
    pub(crate) state: ModuleState,
    pub(crate) module: BoxedModule<C>,
}

impl<C> ModuleSlot<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }
}

/// Priority-ordered module instances. Owns every module for the orchestrator's lifetime.
pub struct ModuleRegistry<C> {
    slots: Vec<ModuleSlot<C>>,
}

impl<C> ModuleRegistry<C> {
    /// Instantiates and orders the given descriptors.
    ///
    /// # Errors
    /// [`FrameworkError::DuplicateModule`] if two descriptors share a name.
    pub fn build(
        descriptors: impl IntoIterator<Item = ModuleDescriptor<C>>,
        default_priority: i32,
    ) -> Result<Self, FrameworkError> {
        let mut seen = HashSet::new();
        let mut slots = Vec::new();

        for descriptor in descriptors {
            if !seen.insert(descriptor.name()) {
                return Err(FrameworkError::DuplicateModule(descriptor.name()));
            }
            slots.push(ModuleSlot {
                name: descriptor.name(),
                priority: descriptor.priority().unwrap_or(default_priority),
                state: ModuleState::Uninitialized,
                module: descriptor.instantiate(),
            });
        }

        // `sort_by_key` is stable: ties stay in discovery order.
        slots.sort_by_key(|slot| slot.priority);

        for slot in &slots {
            info!(module = slot.name, priority = slot.priority, "Module registered");
        }

        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Module names in priority order.
    pub fn order(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.name).collect()
    }

    pub fn slots(&self) -> &[ModuleSlot<C>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [ModuleSlot<C>] {
        &mut self.slots
    }

    pub fn get(&self, name: &str) -> Option<&ModuleSlot<C>> {
        self.slots.iter().find(|slot| slot.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::module::Module;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Blank;

    #[async_trait]
    impl Module for Blank {
        type Context = ();
        async fn init(&mut self, _ctx: &()) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn blank(name: &'static str, priority: Option<i32>) -> ModuleDescriptor<()> {
        ModuleDescriptor::new(name, priority, || Box::new(Blank))
    }

    #[test]
    fn test_sorts_ascending_by_priority() {
        let registry = ModuleRegistry::build(
            vec![blank("Audio", Some(2)), blank("Config", Some(0)), blank("UI", Some(1))],
            100,
        )
        .unwrap();
        assert_eq!(registry.order(), vec!["Config", "UI", "Audio"]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let forward = ModuleRegistry::build(
            vec![blank("A", Some(5)), blank("B", Some(5)), blank("C", Some(1))],
            100,
        )
        .unwrap();
        assert_eq!(forward.order(), vec!["C", "A", "B"]);

        let reversed = ModuleRegistry::build(
            vec![blank("B", Some(5)), blank("C", Some(1)), blank("A", Some(5))],
            100,
        )
        .unwrap();
        assert_eq!(reversed.order(), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_unannotated_modules_get_default_priority() {
        let registry = ModuleRegistry::build(
            vec![blank("Late", None), blank("Early", Some(99)), blank("Later", None)],
            100,
        )
        .unwrap();
        assert_eq!(registry.order(), vec!["Early", "Late", "Later"]);
        assert_eq!(registry.get("Late").unwrap().priority(), 100);
        assert!(registry
            .slots()
            .iter()
            .all(|slot| slot.state() == ModuleState::Uninitialized));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = ModuleRegistry::build(vec![blank("UI", Some(1)), blank("UI", Some(2))], 100);
        assert!(matches!(result, Err(FrameworkError::DuplicateModule("UI"))));
    }
}
