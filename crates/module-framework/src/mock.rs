//! # Mock Modules & Testing Guide
//!
//! [`MockModule`] is a scriptable module that records every lifecycle call into a shared
//! [`CallLog`]. It lets you test ordering, fail-fast and isolation rules of the orchestrator
//! without any real subsystem behind it.
//!
//! ## When to use Mocks vs Real Modules
//!
//! | Feature | MockModule | Real Module |
//! |---------|------------|-------------|
//! | **Speed** | Instant | Depends on engine services |
//! | **Determinism** | 100% deterministic | Depends on the engine |
//! | **Error Injection** | Easy (`fail_init`, `panic_update`) | Hard (requires specific state) |
//! | **Use Case** | Orchestrator policy | Module behaviour itself |
//!
//! ## Example
//!
//! ```rust
//! use module_framework::mock::{CallLog, LifecycleCall, MockModule};
//! use module_framework::{FrameworkError, ModuleOrchestrator, OrchestratorConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let log = CallLog::new();
//!     let descriptors = vec![
//!         MockModule::new("Audio", &log).into_descriptor(Some(2)),
//!         MockModule::new("UI", &log).fail_init("missing [UI] root").into_descriptor(Some(1)),
//!         MockModule::new("Config", &log).into_descriptor(Some(0)),
//!     ];
//!     let mut orchestrator =
//!         ModuleOrchestrator::new(descriptors, OrchestratorConfig::default()).unwrap();
//!
//!     let err = orchestrator.initialize_all(&()).await.unwrap_err();
//!     assert!(matches!(err, FrameworkError::ModuleInit { module: "UI", .. }));
//!     assert!(!log.contains("Audio", LifecycleCall::InitStarted));
//! }
//! ```

use crate::descriptor::ModuleDescriptor;
use crate::error::BoxError;
use crate::module::Module;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Lifecycle event recorded by a [`MockModule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCall {
    InitStarted,
    InitCompleted,
    Update,
    Release,
}

/// Shared, ordered journal of lifecycle calls across mock modules.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<(&'static str, LifecycleCall)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, module: &'static str, call: LifecycleCall) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((module, call));
    }

    /// Every recorded call, in the order it happened.
    pub fn entries(&self) -> Vec<(&'static str, LifecycleCall)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Module names that received `call`, in order.
    pub fn modules_with(&self, call: LifecycleCall) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, c)| *c == call)
            .map(|(module, _)| module)
            .collect()
    }

    pub fn contains(&self, module: &str, call: LifecycleCall) -> bool {
        self.entries()
            .iter()
            .any(|(m, c)| *m == module && *c == call)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[derive(Debug, Clone)]
enum InitBehavior {
    Succeed,
    Fail(String),
    Hang,
}

#[derive(Debug, Clone)]
enum HookBehavior {
    Succeed,
    Fail(String),
    Panic(String),
}

impl HookBehavior {
    fn run(&self) -> Result<(), BoxError> {
        match self {
            Self::Succeed => Ok(()),
            Self::Fail(msg) => Err(msg.clone().into()),
            Self::Panic(msg) => panic!("{msg}"),
        }
    }
}

/// A module whose behaviour is scripted with builder methods.
#[derive(Debug, Clone)]
pub struct MockModule {
    name: &'static str,
    log: CallLog,
    init: InitBehavior,
    init_delay: Option<Duration>,
    update: HookBehavior,
    release: HookBehavior,
}

impl MockModule {
    /// A module that succeeds at everything.
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: log.clone(),
            init: InitBehavior::Succeed,
            init_delay: None,
            update: HookBehavior::Succeed,
            release: HookBehavior::Succeed,
        }
    }

    pub fn fail_init(mut self, msg: impl Into<String>) -> Self {
        self.init = InitBehavior::Fail(msg.into());
        self
    }

    /// Init never completes.
    pub fn hang_init(mut self) -> Self {
        self.init = InitBehavior::Hang;
        self
    }

    /// Sleeps before completing init, to expose any interleaving.
    pub fn init_delay(mut self, delay: Duration) -> Self {
        self.init_delay = Some(delay);
        self
    }

    pub fn fail_update(mut self, msg: impl Into<String>) -> Self {
        self.update = HookBehavior::Fail(msg.into());
        self
    }

    pub fn panic_update(mut self, msg: impl Into<String>) -> Self {
        self.update = HookBehavior::Panic(msg.into());
        self
    }

    pub fn fail_release(mut self, msg: impl Into<String>) -> Self {
        self.release = HookBehavior::Fail(msg.into());
        self
    }

    pub fn panic_release(mut self, msg: impl Into<String>) -> Self {
        self.release = HookBehavior::Panic(msg.into());
        self
    }

    /// Wraps this mock in a descriptor. Each instantiation gets a clone sharing the log.
    pub fn into_descriptor(self, priority: Option<i32>) -> ModuleDescriptor<()> {
        let name = self.name;
        ModuleDescriptor::new(name, priority, move || Box::new(self.clone()))
    }
}

#[async_trait]
impl Module for MockModule {
    type Context = ();

    async fn init(&mut self, _ctx: &()) -> Result<(), BoxError> {
        self.log.record(self.name, LifecycleCall::InitStarted);
        if let Some(delay) = self.init_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.init {
            InitBehavior::Succeed => {}
            InitBehavior::Fail(msg) => return Err(msg.clone().into()),
            InitBehavior::Hang => std::future::pending::<()>().await,
        }
        self.log.record(self.name, LifecycleCall::InitCompleted);
        Ok(())
    }

    fn update(&mut self) -> Result<(), BoxError> {
        self.log.record(self.name, LifecycleCall::Update);
        self.update.run()
    }

    fn release(&mut self) -> Result<(), BoxError> {
        self.log.record(self.name, LifecycleCall::Release);
        self.release.run()
    }
}
