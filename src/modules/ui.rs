//! UI module: binds the UI root object and opens panels under it.

use super::AppContext;
use crate::engine::{ObjectId, SharedEngine};
use async_trait::async_trait;
use module_framework::{BoxError, Module, ModuleType};
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur during UI operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UiError {
    /// The UI root object is not in the scene.
    #[error("UI root object not found: {0}")]
    RootNotFound(String),

    /// The module has not been initialized, or was released.
    #[error("UI module not initialized")]
    NotInitialized,

    /// No asset exists for the requested panel.
    #[error("Panel asset not found: {0}")]
    PanelNotFound(String),
}

#[derive(Default)]
pub struct Ui {
    engine: Option<SharedEngine>,
    root: Option<ObjectId>,
}

impl Ui {
    pub fn root(&self) -> Option<ObjectId> {
        self.root
    }

    /// Loads the panel asset `name` and instantiates it under the UI root.
    pub async fn open_panel(&self, name: &str) -> Result<ObjectId, UiError> {
        let (Some(engine), Some(root)) = (&self.engine, self.root) else {
            error!(panel = name, "open_panel called before UI init");
            return Err(UiError::NotInitialized);
        };

        let Some(asset) = engine.load_asset(name).await else {
            error!(panel = name, "Panel asset not found");
            return Err(UiError::PanelNotFound(name.to_string()));
        };

        let panel = engine.instantiate(asset, root);
        info!(panel = name, %panel, "Panel opened");
        Ok(panel)
    }
}

#[async_trait]
impl Module for Ui {
    type Context = AppContext;

    async fn init(&mut self, ctx: &AppContext) -> Result<(), BoxError> {
        let root_name = &ctx.settings.ui.root_name;
        let root = ctx
            .engine
            .find_object(root_name)
            .ok_or_else(|| UiError::RootNotFound(root_name.clone()))?;

        self.engine = Some(ctx.engine.clone());
        self.root = Some(root);
        info!(%root, "UI module initialized");
        Ok(())
    }

    fn release(&mut self) -> Result<(), BoxError> {
        self.root = None;
        self.engine = None;
        Ok(())
    }
}

impl ModuleType for Ui {
    const NAME: &'static str = "UI";
    const PRIORITY: Option<i32> = Some(1);
}
