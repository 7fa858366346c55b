//! # Game Lifecycle
//!
//! This module owns the runtime lifecycle of the game: building the module set, starting it,
//! dispatching frames, and shutting down.
//!
//! ## The GameRoot Pattern
//!
//! [`GameRoot`] is the "conductor". It owns every module instance through a
//! [`ModuleOrchestrator`](module_framework::ModuleOrchestrator) and hands out typed references
//! on request. Nothing reaches a module through a global.
//!
//! ```rust,ignore
//! let engine: SharedEngine = Arc::new(HeadlessEngine::new().with_object("[UI]").with_object("[Audio]"));
//! let mut root = GameRoot::new(engine, Settings::default())?;
//!
//! root.start().await?;          // Config -> UI -> Audio, then load scene 1
//! loop {
//!     root.tick()?;             // Config.update, UI.update, Audio.update
//! }
//! root.shutdown();              // Audio, UI, Config
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Modules are created with `Default` and receive an [`AppContext`](crate::modules::AppContext)
//! (engine services + settings) in `init`. A module keeps whatever it needs from the context,
//! such as a clone of the engine handle.
//!
//! ## Startup Failure
//!
//! If a module's init fails, [`GameRoot::start`] returns the `ModuleInit` error naming it.
//! The root stays not-ready, later modules are never initialized, and the startup scene is
//! not loaded. [`GameRoot::shutdown`] can still be called to release what was set up.

pub mod game_root;

pub use game_root::*;
