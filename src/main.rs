//! Demo: starts the game root on a headless engine, runs a few frames of UI and audio
//! activity, and shuts down.

use game_framework::engine::{AudioClip, HeadlessEngine, SharedEngine};
use game_framework::lifecycle::GameRoot;
use game_framework::settings::Settings;
use module_framework::tracing::setup_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Instrument};

const FRAMES: u32 = 12;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let settings = Settings::resolve(std::env::args_os().nth(1).map(Into::into))
        .map_err(|e| e.to_string())?;
    info!(?settings, "Settings loaded");

    let headless = Arc::new(
        HeadlessEngine::new()
            .with_object(&settings.ui.root_name)
            .with_object(&settings.audio.root_name)
            .with_asset("Panels/MainMenu"),
    );
    let engine: SharedEngine = headless.clone();

    let mut root = GameRoot::new(engine, settings).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("startup");
    root.start()
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;
    info!(scenes = ?headless.loaded_scenes(), "Game root ready");

    let panel = root
        .ui()
        .map_err(|e| e.to_string())?
        .open_panel("Panels/MainMenu")
        .await
        .map_err(|e| e.to_string())?;
    info!(%panel, "Main menu open");

    let theme = AudioClip::new("theme", 600);
    let click = AudioClip::new("click", 5);
    {
        let audio = root.audio_mut().map_err(|e| e.to_string())?;
        audio.play_bgm(&theme, 0.8).map_err(|e| e.to_string())?;
    }

    let mut interval = tokio::time::interval(Duration::from_millis(16));
    for frame in 0..FRAMES {
        interval.tick().await;

        let audio = root.audio_mut().map_err(|e| e.to_string())?;
        let playback = audio.play_sfx(&click, 1.0).map_err(|e| e.to_string())?;
        info!(frame, channel = playback.channel, kind = ?playback.acquisition, "SFX");

        headless.advance_frame();
        match root.tick() {
            Ok(report) if report.is_clean() => {}
            Ok(report) => error!(failures = report.failures.len(), "Frame had module failures"),
            Err(e) => return Err(e.to_string()),
        }
    }

    // Shutdown gracefully
    let failures = root.shutdown();
    for failure in &failures {
        error!(error = %failure, "Release failed");
    }

    info!("Application completed successfully");
    Ok(())
}
