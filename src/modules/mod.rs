//! # Game Modules
//!
//! The three subsystems driven by the [`GameRoot`](crate::lifecycle::GameRoot):
//!
//! | Module | Priority | Binds | Provides |
//! |--------|----------|-------|----------|
//! | [`Config`] | 0 | nothing | free-form `[values]` lookups |
//! | [`Ui`] | 1 | `[UI]` root object | [`Ui::open_panel`] |
//! | [`Audio`] | 2 | `[Audio]` root object | [`Audio::play_sfx`], [`Audio::play_bgm`] |
//!
//! Every module is default-constructed and receives the [`AppContext`] in `init`. A module
//! that needs a scene object checks for it there, so a missing object fails startup with a
//! named `ModuleInit` error instead of failing later on first use.
//!
//! ## Registering a Module
//!
//! Implement [`Module`](module_framework::Module) and
//! [`ModuleType`](module_framework::ModuleType), then add it to [`descriptors`]. The list is
//! the only place modules are discovered; its order only breaks priority ties.

pub mod audio;
pub mod config;
pub mod ui;

pub use audio::{Audio, AudioError, SfxChannel};
pub use config::Config;
pub use ui::{Ui, UiError};

use crate::engine::SharedEngine;
use crate::settings::Settings;
use module_framework::ModuleDescriptor;

/// Dependencies injected into every module's `init`.
#[derive(Clone)]
pub struct AppContext {
    pub engine: SharedEngine,
    pub settings: Settings,
}

impl AppContext {
    pub fn new(engine: SharedEngine, settings: Settings) -> Self {
        Self { engine, settings }
    }
}

/// The module set of the game, in discovery order.
pub fn descriptors() -> Vec<ModuleDescriptor<AppContext>> {
    vec![
        ModuleDescriptor::of::<Config>(),
        ModuleDescriptor::of::<Ui>(),
        ModuleDescriptor::of::<Audio>(),
    ]
}
