//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber. Call it once, from the binary.
//!
//! ## What Gets Traced
//!
//! - **Registration**: one `Module registered` event per module with its resolved priority.
//! - **Init**: every module's init runs inside a `module_init` span carrying `module`.
//!   Failures are logged at `error` before startup aborts.
//! - **Update / Release**: failures at `warn`, with the module name and cause.
//! - **Pools**: growth and eviction at `debug`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle milestones
//! RUST_LOG=debug cargo run    # per-module init start, pool growth and eviction
//! RUST_LOG=module_framework=debug,game_framework=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a clean start looks like:
//!
//! ```text
//! INFO Module registered module="Config" priority=0
//! INFO Module registered module="UI" priority=1
//! INFO Module registered module="Audio" priority=2
//! INFO Initializing modules modules=3
//! INFO module_init: Module initialized module="Config"
//! INFO module_init: Module initialized module="UI"
//! INFO module_init: Module initialized module="Audio"
//! INFO All modules ready
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
