//! # Module Trait
//!
//! The `Module` trait is the contract every subsystem implements to be driven by the
//! [`ModuleOrchestrator`](crate::ModuleOrchestrator). It has three lifecycle hooks:
//!
//! - [`Module::init`] – asynchronous one-time setup, awaited before the next module starts.
//! - [`Module::update`] – synchronous per-tick work. Must return promptly.
//! - [`Module::release`] – synchronous best-effort teardown.
//!
//! # Context Injection
//! `init` receives a `Context` (the engine services,
//! settings, and so on). Dependencies are handed over at init time instead of being looked
//! up through a global, so modules stay default-constructible.
//!
//! # Static Metadata
//! [`ModuleType`] attaches a name and an optional priority to the module *type*. The
//! orchestrator reads them once, when the descriptor list is turned into a registry.

use crate::error::BoxError;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;

/// Lifecycle state of one module instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Failed,
    Released,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Released => "released",
        };
        f.write_str(s)
    }
}

/// Upcast helper so boxed modules can be downcast back to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A subsystem with an ordered init/update/release lifecycle.
///
/// # Async & Context
/// This trait is `#[async_trait]` so `init` can await engine services (asset loads and the
/// like) while staying object-safe. The orchestrator stores modules as
/// `Box<dyn Module<Context = C>>`, so all modules of one orchestrator share a context type.
#[async_trait]
pub trait Module: AsAny + Send + Sync {
    /// Dependencies injected into `init`. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One-time setup. Called exactly once, in priority order.
    async fn init(&mut self, ctx: &Self::Context) -> Result<(), BoxError>;

    /// Per-tick work. Only called after every module initialized successfully.
    fn update(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Teardown. Called in reverse priority order.
    fn release(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Static metadata for a module type, consumed by
/// [`ModuleDescriptor::of`](crate::ModuleDescriptor::of).
///
/// ```rust
/// use module_framework::{BoxError, Module, ModuleType};
/// use async_trait::async_trait;
///
/// #[derive(Default)]
/// struct Config;
///
/// #[async_trait]
/// impl Module for Config {
///     type Context = ();
///     async fn init(&mut self, _: &()) -> Result<(), BoxError> { Ok(()) }
/// }
///
/// impl ModuleType for Config {
///     const NAME: &'static str = "Config";
///     const PRIORITY: Option<i32> = Some(0);
/// }
/// ```
pub trait ModuleType: Module + Default + Sized {
    const NAME: &'static str;
    const PRIORITY: Option<i32> = None;
}
