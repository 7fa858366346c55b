use crate::engine::SharedEngine;
use crate::modules::{self, AppContext, Audio, Config, Ui};
use crate::settings::{Settings, SettingsError};
use module_framework::{FrameworkError, ModuleOrchestrator, ModuleState, TickReport};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors surfaced by [`GameRoot`].
#[derive(Debug, Error)]
pub enum RootError {
    #[error(transparent)]
    Framework(#[from] FrameworkError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A module was looked up that is not registered.
    #[error("Module not registered: {0}")]
    ModuleMissing(&'static str),
}

/// The root coordinator of the game.
///
/// `GameRoot` is responsible for:
/// - **Module Ownership**: the only owner of the Config, UI and Audio instances
/// - **Startup**: sequential module init, then the transition to the startup scene
/// - **Frame Dispatch**: one update per module per tick
/// - **Shutdown**: reverse-order release
///
/// # Example
///
/// ```ignore
/// let mut root = GameRoot::new(engine, settings)?;
/// root.start().await?;
///
/// let panel = root.ui()?.open_panel("Panels/MainMenu").await?;
/// root.audio_mut()?.play_sfx(&click, 1.0)?;
/// root.tick()?;
///
/// root.shutdown();
/// ```
pub struct GameRoot {
    orchestrator: ModuleOrchestrator<AppContext>,
    context: AppContext,
}

impl GameRoot {
    /// Registers the game modules and orders them. No module is initialized yet.
    ///
    /// The startup scene (if configured) is loaded from the ready hook, so it only happens
    /// after every module initialized successfully.
    pub fn new(engine: SharedEngine, settings: Settings) -> Result<Self, RootError> {
        settings.validate()?;
        let startup_scene = settings.orchestrator.startup_scene;
        let config = settings.orchestrator.to_config();

        let orchestrator = ModuleOrchestrator::new(modules::descriptors(), config)?.on_ready(
            move |ctx: &AppContext| {
                if let Some(scene) = startup_scene {
                    info!(scene, "Startup complete, switching scene");
                    ctx.engine.load_scene(scene);
                }
            },
        );

        Ok(Self {
            orchestrator,
            context: AppContext::new(engine, settings),
        })
    }

    /// Initializes every module in priority order.
    ///
    /// On failure nothing after the failing module is initialized, the root never becomes
    /// ready and no scene transition happens.
    pub async fn start(&mut self) -> Result<(), RootError> {
        info!("Starting game root");
        if let Err(e) = self.orchestrator.initialize_all(&self.context).await {
            error!(error = %e, "Startup aborted");
            return Err(e.into());
        }
        Ok(())
    }

    /// Runs one frame of module updates.
    pub fn tick(&mut self) -> Result<TickReport, RootError> {
        let report = self.orchestrator.update_all()?;
        for failure in &report.failures {
            warn!(error = %failure, "Frame completed with module failure");
        }
        Ok(report)
    }

    /// Releases every module. Returns the failures that occurred along the way.
    pub fn shutdown(&mut self) -> Vec<FrameworkError> {
        info!("Shutting down game root...");
        let failures = self.orchestrator.release_all();
        info!(failures = failures.len(), "Game root shutdown complete.");
        failures
    }

    pub fn is_ready(&self) -> bool {
        self.orchestrator.is_initialized()
    }

    pub fn states(&self) -> Vec<(&'static str, ModuleState)> {
        self.orchestrator.states()
    }

    pub fn orchestrator(&self) -> &ModuleOrchestrator<AppContext> {
        &self.orchestrator
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn config(&self) -> Result<&Config, RootError> {
        self.orchestrator
            .module::<Config>()
            .ok_or(RootError::ModuleMissing("Config"))
    }

    pub fn ui(&self) -> Result<&Ui, RootError> {
        self.orchestrator
            .module::<Ui>()
            .ok_or(RootError::ModuleMissing("UI"))
    }

    pub fn audio(&self) -> Result<&Audio, RootError> {
        self.orchestrator
            .module::<Audio>()
            .ok_or(RootError::ModuleMissing("Audio"))
    }

    pub fn audio_mut(&mut self) -> Result<&mut Audio, RootError> {
        self.orchestrator
            .module_mut::<Audio>()
            .ok_or(RootError::ModuleMissing("Audio"))
    }
}
