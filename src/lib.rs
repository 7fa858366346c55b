//! # Game Framework
//!
//! > **A module lifecycle for games, independent of the engine underneath.**
//!
//! This crate wires three game subsystems (Config, UI, Audio) onto the generic
//! [`module_framework`] orchestrator. It discovers them from an explicit registration list,
//! initializes them one after another in priority order, ticks them every frame and releases
//! them in reverse order on shutdown.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Boundary ([`engine`])
//! Everything engine-specific sits behind the [`Engine`](engine::Engine) trait: object lookup,
//! async asset loading, audio sources, scene loading.
//! - **Key items**: [`Engine`](engine::Engine), [`HeadlessEngine`](engine::HeadlessEngine).
//!
//! ### 2. The Modules ([`modules`])
//! - [`Config`](modules::Config) serves the `[values]` settings table.
//! - [`Ui`](modules::Ui) binds the `[UI]` root and opens panels.
//! - [`Audio`](modules::Audio) binds the `[Audio]` root, plays BGM and pooled SFX.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`GameRoot`](lifecycle::GameRoot) owns the modules, starts them, fires the startup scene
//! transition, ticks and shuts down.
//!
//! ### 4. Settings ([`settings`])
//! TOML settings with defaults for every field.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run -- game.toml
//! ```

pub mod engine;
pub mod lifecycle;
pub mod modules;
pub mod settings;
