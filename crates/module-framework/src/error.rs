//! # Framework Errors
//!
//! This module defines the error types shared by the orchestrator and the resource pool.
//! By centralizing error definitions, every lifecycle failure carries the identity of the
//! module it came from, so callers can report exactly which module broke and why.
//!
//! ## Propagation
//!
//! | Variant | Raised by | Effect |
//! |---------|-----------|--------|
//! | `ModuleInit` | `initialize_all` | Fatal: remaining modules are never initialized |
//! | `ModuleUpdate` | `update_all` | Isolated: reported, siblings still update |
//! | `ModuleRelease` | `release_all` | Collected: remaining modules still release |

use std::time::Duration;

/// Boxed error returned by module lifecycle hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur within the module framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Module '{module}' failed to initialize: {source}")]
    ModuleInit {
        module: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("Module '{module}' failed to update: {source}")]
    ModuleUpdate {
        module: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("Module '{module}' failed to release: {source}")]
    ModuleRelease {
        module: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("Module registered twice: {0}")]
    DuplicateModule(&'static str),
    #[error("Initialization already started")]
    AlreadyStarted,
    #[error("Modules are not initialized")]
    NotInitialized,
    #[error("Pool capacity must be at least 1")]
    ZeroCapacity,
}

impl FrameworkError {
    /// Name of the module this error is attributed to, if any.
    pub fn module(&self) -> Option<&'static str> {
        match self {
            Self::ModuleInit { module, .. }
            | Self::ModuleUpdate { module, .. }
            | Self::ModuleRelease { module, .. } => Some(module),
            Self::DuplicateModule(module) => Some(module),
            _ => None,
        }
    }
}

/// Cause attached to a `ModuleInit` error when a module misses its init deadline.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("init timed out after {0:?}")]
pub struct InitTimeout(pub Duration);

/// Cause attached to update/release errors when the module panicked.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("module panicked: {0}")]
pub struct ModulePanic(pub String);

impl ModulePanic {
    pub(crate) fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self(message)
    }
}
