//! # Module Orchestrator
//!
//! The `ModuleOrchestrator` owns every module, fixes their order once, and drives them
//! through init, per-tick update and release.
//!
//! ## Lifecycle
//!
//! ```text
//! Pending --initialize_all--> Initializing --ok--> Ready --release_all--> Released
//!                                   |
//!                                   +--first failure--> Failed --release_all--> Released
//! ```
//!
//! * **Init** is sequential. Module N+1 never starts before module N's init future has
//!   resolved. The first failure aborts the sequence; later modules stay `Uninitialized`,
//!   the orchestrator never becomes ready and the ready hook never fires.
//! * **Update** is synchronous and isolated. Every module gets its call each tick, even if an
//!   earlier one returned an error or panicked. Failures are collected into a [`TickReport`].
//! * **Release** runs in reverse priority order and is best-effort. Every module ends up
//!   `Released`; failures are collected and returned.
//!
//! ## Concurrency Model
//! There is no parallelism here. All methods take `&mut self`, so the only suspension point
//! is inside `initialize_all`, and it is never interleaved with other lifecycle calls.

use crate::config::OrchestratorConfig;
use crate::descriptor::ModuleDescriptor;
use crate::error::{BoxError, FrameworkError, InitTimeout, ModulePanic};
use crate::module::{Module, ModuleState};
use crate::registry::ModuleRegistry;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Action fired once, right after every module reached `Ready`.
pub type ReadyHook<C> = Box<dyn FnOnce(&C) + Send>;

/// Overall progress of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Initializing,
    Ready,
    Failed,
    Released,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Released => "released",
        };
        f.write_str(s)
    }
}

/// Outcome of one [`ModuleOrchestrator::update_all`] call.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Number of modules whose update was invoked.
    pub updated: usize,
    /// One `ModuleUpdate` error per module that failed this tick.
    pub failures: Vec<FrameworkError>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives an ordered set of modules sharing the context type `C`.
///
/// # Example
///
/// ```rust
/// use module_framework::{BoxError, Module, ModuleDescriptor, ModuleOrchestrator, ModuleType, OrchestratorConfig};
/// use async_trait::async_trait;
///
/// #[derive(Default)]
/// struct Audio { ticks: u32 }
///
/// #[async_trait]
/// impl Module for Audio {
///     type Context = ();
///     async fn init(&mut self, _: &()) -> Result<(), BoxError> { Ok(()) }
///     fn update(&mut self) -> Result<(), BoxError> { self.ticks += 1; Ok(()) }
/// }
///
/// impl ModuleType for Audio {
///     const NAME: &'static str = "Audio";
///     const PRIORITY: Option<i32> = Some(2);
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut orchestrator =
///         ModuleOrchestrator::new(vec![ModuleDescriptor::of::<Audio>()], OrchestratorConfig::default())
///             .unwrap();
///     orchestrator.initialize_all(&()).await.unwrap();
///     orchestrator.update_all().unwrap();
///     assert_eq!(orchestrator.module::<Audio>().unwrap().ticks, 1);
///     assert!(orchestrator.release_all().is_empty());
/// }
/// ```
pub struct ModuleOrchestrator<C> {
    registry: ModuleRegistry<C>,
    config: OrchestratorConfig,
    phase: Phase,
    on_ready: Option<ReadyHook<C>>,
}

impl<C: Send + Sync + 'static> ModuleOrchestrator<C> {
    /// Builds the registry from `descriptors`.
    ///
    /// # Errors
    /// [`FrameworkError::DuplicateModule`] if two descriptors share a name.
    pub fn new(
        descriptors: impl IntoIterator<Item = ModuleDescriptor<C>>,
        config: OrchestratorConfig,
    ) -> Result<Self, FrameworkError> {
        let registry = ModuleRegistry::build(descriptors, config.default_priority)?;
        Ok(Self {
            registry,
            config,
            phase: Phase::Pending,
            on_ready: None,
        })
    }

    /// Sets the action fired once after successful initialization.
    pub fn on_ready(mut self, hook: impl FnOnce(&C) + Send + 'static) -> Self {
        self.on_ready = Some(Box::new(hook));
        self
    }

    /// Initializes every module in priority order, awaiting each before the next.
    ///
    /// # Errors
    /// - [`FrameworkError::AlreadyStarted`] if called more than once.
    /// - [`FrameworkError::ModuleInit`] for the first module whose init fails or times out.
    ///   Modules after it are never initialized.
    pub async fn initialize_all(&mut self, ctx: &C) -> Result<(), FrameworkError> {
        if self.phase != Phase::Pending {
            warn!(phase = %self.phase, "initialize_all called twice");
            return Err(FrameworkError::AlreadyStarted);
        }
        self.phase = Phase::Initializing;
        info!(modules = self.registry.len(), "Initializing modules");

        let timeout = self.config.init_timeout;
        for slot in self.registry.slots_mut() {
            let module = slot.name;
            slot.state = ModuleState::Initializing;

            let span = info_span!("module_init", module);
            let result = async {
                debug!(priority = slot.priority, "Init started");
                match timeout {
                    Some(limit) => match tokio::time::timeout(limit, slot.module.init(ctx)).await {
                        Ok(result) => result,
                        Err(_) => Err(BoxError::from(InitTimeout(limit))),
                    },
                    None => slot.module.init(ctx).await,
                }
            }
            .instrument(span)
            .await;

            if let Err(source) = result {
                slot.state = ModuleState::Failed;
                self.phase = Phase::Failed;
                error!(module, error = %source, "Module init failed, aborting startup");
                return Err(FrameworkError::ModuleInit { module, source });
            }

            slot.state = ModuleState::Ready;
            info!(module, "Module initialized");
        }

        self.phase = Phase::Ready;
        info!("All modules ready");
        if let Some(hook) = self.on_ready.take() {
            hook(ctx);
        }
        Ok(())
    }

    /// Calls every module's update once, in priority order.
    ///
    /// A failing or panicking module does not stop the rest of the tick; its error is
    /// recorded in the returned report.
    ///
    /// # Errors
    /// [`FrameworkError::NotInitialized`] unless initialization completed successfully and
    /// the modules have not been released. No module is touched in that case.
    pub fn update_all(&mut self) -> Result<TickReport, FrameworkError> {
        if self.phase != Phase::Ready {
            return Err(FrameworkError::NotInitialized);
        }

        let mut report = TickReport::default();
        for slot in self.registry.slots_mut() {
            let module = slot.name;
            let outcome = catch_unwind(AssertUnwindSafe(|| slot.module.update()));
            report.updated += 1;

            let source = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => BoxError::from(ModulePanic::from_payload(payload)),
            };
            warn!(module, error = %source, "Module update failed");
            report
                .failures
                .push(FrameworkError::ModuleUpdate { module, source });
        }
        Ok(report)
    }

    /// Releases every module in reverse priority order.
    ///
    /// Best-effort: every module ends `Released` regardless of individual failures, which
    /// are returned. Modules already released are skipped, so repeated calls are no-ops.
    pub fn release_all(&mut self) -> Vec<FrameworkError> {
        let mut failures = Vec::new();
        for slot in self.registry.slots_mut().iter_mut().rev() {
            if slot.state == ModuleState::Released {
                continue;
            }
            let module = slot.name;
            let outcome = catch_unwind(AssertUnwindSafe(|| slot.module.release()));
            slot.state = ModuleState::Released;

            let source = match outcome {
                Ok(Ok(())) => {
                    debug!(module, "Module released");
                    continue;
                }
                Ok(Err(e)) => e,
                Err(payload) => BoxError::from(ModulePanic::from_payload(payload)),
            };
            warn!(module, error = %source, "Module release failed");
            failures.push(FrameworkError::ModuleRelease { module, source });
        }

        if self.phase != Phase::Released {
            info!(failures = failures.len(), "Modules released");
        }
        self.phase = Phase::Released;
        failures
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` once every module initialized successfully (and until release).
    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Module names in priority order.
    pub fn order(&self) -> Vec<&'static str> {
        self.registry.order()
    }

    pub fn state_of(&self, name: &str) -> Option<ModuleState> {
        self.registry.get(name).map(|slot| slot.state)
    }

    /// `(name, state)` for every module, in priority order.
    pub fn states(&self) -> Vec<(&'static str, ModuleState)> {
        self.registry
            .slots()
            .iter()
            .map(|slot| (slot.name, slot.state))
            .collect()
    }

    pub fn registry(&self) -> &ModuleRegistry<C> {
        &self.registry
    }

    /// Typed access to a module instance.
    pub fn module<M: Module>(&self) -> Option<&M> {
        self.registry.slots().iter().find_map(|slot| {
            let module: &dyn Module<Context = C> = slot.module.as_ref();
            module.as_any().downcast_ref::<M>()
        })
    }

    /// Typed mutable access to a module instance.
    pub fn module_mut<M: Module>(&mut self) -> Option<&mut M> {
        self.registry.slots_mut().iter_mut().find_map(|slot| {
            let module: &mut dyn Module<Context = C> = slot.module.as_mut();
            module.as_any_mut().downcast_mut::<M>()
        })
    }
}
