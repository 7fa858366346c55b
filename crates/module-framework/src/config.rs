//! Orchestrator configuration.

use std::time::Duration;

/// Priority assigned to modules that declare none. Sorts after every annotated module
/// that uses a smaller value.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Knobs consumed by [`ModuleOrchestrator`](crate::ModuleOrchestrator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Priority used when a descriptor carries no priority metadata.
    pub default_priority: i32,
    /// Deadline for each module's init step. `None` waits indefinitely.
    pub init_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            init_timeout: None,
        }
    }
}

impl OrchestratorConfig {
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn with_init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }
}
