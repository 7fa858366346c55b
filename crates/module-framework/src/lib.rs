//! # Module Framework
//!
//! This crate provides the engine-independent core of the game framework: a lifecycle
//! orchestrator for a fixed set of subsystems ("modules") and a bounded resource pool those
//! subsystems use to share out transient handles.
//!
//! ## Architecture Overview
//!
//! 1. **Module Layer** ([`Module`], [`ModuleType`]) - your subsystem and its static metadata
//! 2. **Registration Layer** ([`ModuleDescriptor`], [`ModuleRegistry`]) - an explicit list of
//!    factories, instantiated once and sorted by priority
//! 3. **Runtime Layer** ([`ModuleOrchestrator`]) - sequential async init, per-tick update,
//!    reverse-order release
//!
//! The [`pool`] module is independent of the three layers above. A module may own a
//! [`ResourcePool`] internally; the orchestrator never sees it.
//!
//! ## Ordering Rules
//!
//! - Lower priority runs first. Modules without a priority get
//!   [`DEFAULT_PRIORITY`](config::DEFAULT_PRIORITY) (100).
//! - Equal priorities keep registration order (stable sort).
//! - Init awaits each module before starting the next one; the first failure aborts startup.
//! - Update isolates failures per module; release is best-effort in reverse order.
//!
//! ## Context Injection
//!
//! Modules are default-constructed and receive their dependencies at init time through
//! [`Module::Context`]. Nothing is looked up through a global: the orchestrator owns every
//! module and hands out typed references via [`ModuleOrchestrator::module`].
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockModule`](mock::MockModule), a scriptable module that
//! records lifecycle calls, for testing orchestration policy without real subsystems.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod mock;
pub mod module;
pub mod orchestrator;
pub mod pool;
pub mod registry;
pub mod tracing;

// Re-export core types for convenience
pub use config::{OrchestratorConfig, DEFAULT_PRIORITY};
pub use descriptor::{BoxedModule, ModuleDescriptor};
pub use error::{BoxError, FrameworkError, InitTimeout, ModulePanic};
pub use module::{AsAny, Module, ModuleState, ModuleType};
pub use orchestrator::{ModuleOrchestrator, Phase, ReadyHook, TickReport};
pub use pool::{Acquired, Acquisition, PoolHandle, ResourcePool};
pub use registry::{ModuleRegistry, ModuleSlot};
