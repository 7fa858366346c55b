use game_framework::engine::{AudioClip, Engine, HeadlessEngine, SharedEngine};
use game_framework::lifecycle::{GameRoot, RootError};
use game_framework::modules::UiError;
use game_framework::settings::Settings;
use module_framework::{Acquisition, FrameworkError, ModuleState};
use std::sync::Arc;

fn scene() -> Arc<HeadlessEngine> {
    Arc::new(
        HeadlessEngine::new()
            .with_object("[UI]")
            .with_object("[Audio]")
            .with_asset("Panels/MainMenu"),
    )
}

fn root_on(engine: &Arc<HeadlessEngine>, settings: Settings) -> GameRoot {
    let shared: SharedEngine = engine.clone();
    GameRoot::new(shared, settings).expect("Failed to build game root")
}

/// Full startup: every module ready, in priority order, then exactly one scene transition.
#[tokio::test]
async fn test_full_startup_and_shutdown() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());

    assert!(!root.is_ready());
    assert!(engine.loaded_scenes().is_empty());

    root.start().await.expect("Startup failed");

    assert!(root.is_ready());
    assert_eq!(root.orchestrator().order(), vec!["Config", "UI", "Audio"]);
    assert_eq!(
        root.states(),
        vec![
            ("Config", ModuleState::Ready),
            ("UI", ModuleState::Ready),
            ("Audio", ModuleState::Ready),
        ]
    );
    assert_eq!(engine.loaded_scenes(), vec![1]);

    let audio_root = engine.find_object("[Audio]").unwrap();
    assert_eq!(engine.child_names(audio_root), vec!["BGM", "SFX"]);

    let failures = root.shutdown();
    assert!(failures.is_empty());
    assert!(root
        .states()
        .iter()
        .all(|(_, state)| *state == ModuleState::Released));
    assert!(engine.child_names(audio_root).is_empty());
    assert_eq!(engine.loaded_scenes(), vec![1], "No extra scene loads");
}

/// A second start is rejected and the scene is not loaded again.
#[tokio::test]
async fn test_second_start_rejected() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());
    root.start().await.unwrap();

    let result = root.start().await;
    assert!(matches!(
        result,
        Err(RootError::Framework(FrameworkError::AlreadyStarted))
    ));
    assert_eq!(engine.loaded_scenes(), vec![1]);
}

#[tokio::test]
async fn test_open_panel() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());
    root.start().await.unwrap();

    let ui = root.ui().unwrap();
    let panel = ui.open_panel("Panels/MainMenu").await.unwrap();
    assert_eq!(engine.object_name(panel).as_deref(), Some("MainMenu"));
    assert_eq!(engine.parent_of(panel), ui.root());

    let missing = ui.open_panel("Panels/Nope").await;
    assert_eq!(missing, Err(UiError::PanelNotFound("Panels/Nope".to_string())));
}

#[tokio::test]
async fn test_open_panel_before_start() {
    let engine = scene();
    let root = root_on(&engine, Settings::default());

    let result = root.ui().unwrap().open_panel("Panels/MainMenu").await;
    assert_eq!(result, Err(UiError::NotInitialized));
}

/// Eight overlapping effects fill the pool; the ninth and tenth cut off channels 0 and 1.
#[tokio::test]
async fn test_sfx_pool_fills_then_evicts() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());
    root.start().await.unwrap();

    let long = AudioClip::new("explosion", 100);
    let audio = root.audio_mut().unwrap();

    let first = audio.play_sfx(&long, 1.0).unwrap();
    assert_eq!(first.channel, 0);
    assert_eq!(first.acquisition, Acquisition::Reused);

    for expected in 1..8 {
        let playback = audio.play_sfx(&long, 1.0).unwrap();
        assert_eq!(playback.channel, expected);
        assert_eq!(playback.acquisition, Acquisition::Grown);
    }
    assert_eq!(audio.sfx_pool().unwrap().len(), 8);
    assert_eq!(engine.playing_count(), 8);

    let ninth = audio.play_sfx(&long, 1.0).unwrap();
    assert_eq!((ninth.channel, ninth.acquisition), (0, Acquisition::Evicted));
    let tenth = audio.play_sfx(&long, 1.0).unwrap();
    assert_eq!((tenth.channel, tenth.acquisition), (1, Acquisition::Evicted));

    assert_eq!(audio.sfx_pool().unwrap().len(), 8, "Pool never exceeds capacity");
    assert_eq!(engine.playing_count(), 8);
}

/// Once an effect finishes its channel is reused instead of growing the pool.
#[tokio::test]
async fn test_finished_channel_is_reused() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());
    root.start().await.unwrap();

    let click = AudioClip::new("click", 1);
    let audio = root.audio_mut().unwrap();
    audio.play_sfx(&click, 1.0).unwrap();
    audio.play_sfx(&click, 1.0).unwrap();
    assert_eq!(audio.sfx_pool().unwrap().len(), 2);

    engine.advance_frame();
    assert_eq!(engine.playing_count(), 0);

    let audio = root.audio_mut().unwrap();
    let playback = audio.play_sfx(&click, 1.0).unwrap();
    assert_eq!((playback.channel, playback.acquisition), (0, Acquisition::Reused));
    assert_eq!(audio.sfx_pool().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sfx_volume_is_scaled() {
    let engine = scene();
    let settings = Settings::from_toml_str("[audio]\nsfx_volume = 0.5\nbgm_volume = 0.25").unwrap();
    let mut root = root_on(&engine, settings);
    root.start().await.unwrap();

    let audio = root.audio_mut().unwrap();
    audio.play_sfx(&AudioClip::new("click", 3), 0.8).unwrap();
    audio.play_bgm(&AudioClip::new("theme", 10), 1.0).unwrap();

    let channel = audio.sfx_pool().unwrap().get(0).unwrap().source();
    assert_eq!(engine.volume_of(channel), Some(0.4));
    assert_eq!(engine.volume_of(audio.bgm_source().unwrap()), Some(0.25));
}

#[tokio::test]
async fn test_bgm_switches_only_on_new_clip() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());
    root.start().await.unwrap();

    let theme = AudioClip::new("theme", 600);
    let battle = AudioClip::new("battle", 400);
    let audio = root.audio_mut().unwrap();
    let source = audio.bgm_source().unwrap();

    assert!(audio.play_bgm(&theme, 1.0).unwrap());
    assert!(!audio.play_bgm(&theme, 1.0).unwrap(), "Same clip is a no-op");
    assert!(audio.play_bgm(&battle, 1.0).unwrap());
    assert_eq!(engine.clip_of(source), Some(battle.clone()));
    assert_eq!(audio.current_bgm(), Some(&battle));

    // Looping music survives frame advances
    engine.advance_frame();
    assert!(engine.playing_count() >= 1);

    let audio = root.audio_mut().unwrap();
    audio.stop_bgm().unwrap();
    assert_eq!(audio.current_bgm(), None);
    assert_eq!(engine.playing_count(), 0);
}

/// A missing audio root fails Audio's init: earlier modules stay up, no scene transition.
#[tokio::test]
async fn test_missing_audio_root_fails_startup() {
    let engine = Arc::new(HeadlessEngine::new().with_object("[UI]"));
    let mut root = root_on(&engine, Settings::default());

    let result = root.start().await;
    match result {
        Err(RootError::Framework(FrameworkError::ModuleInit { module, .. })) => {
            assert_eq!(module, "Audio")
        }
        other => panic!("Expected Audio init failure, got {other:?}"),
    }

    assert!(!root.is_ready());
    assert!(engine.loaded_scenes().is_empty());
    assert_eq!(
        root.states(),
        vec![
            ("Config", ModuleState::Ready),
            ("UI", ModuleState::Ready),
            ("Audio", ModuleState::Failed),
        ]
    );

    let failures = root.shutdown();
    assert!(failures.is_empty());
}

/// A missing UI root stops startup before Audio is ever initialized.
#[tokio::test]
async fn test_missing_ui_root_skips_later_modules() {
    let engine = Arc::new(HeadlessEngine::new().with_object("[Audio]"));
    let mut root = root_on(&engine, Settings::default());

    let err = root.start().await.unwrap_err();
    assert!(err.to_string().contains("UI"), "Error should name the module: {err}");

    assert_eq!(
        root.states(),
        vec![
            ("Config", ModuleState::Ready),
            ("UI", ModuleState::Failed),
            ("Audio", ModuleState::Uninitialized),
        ]
    );
    assert!(root.audio().unwrap().bgm_source().is_none());
    assert!(engine.loaded_scenes().is_empty());
}

#[tokio::test]
async fn test_tick_requires_start() {
    let engine = scene();
    let mut root = root_on(&engine, Settings::default());

    assert!(matches!(
        root.tick(),
        Err(RootError::Framework(FrameworkError::NotInitialized))
    ));

    root.start().await.unwrap();
    let report = root.tick().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.updated, 3);

    root.shutdown();
    assert!(root.tick().is_err(), "No updates after release");
}

#[tokio::test]
async fn test_config_values_and_custom_startup_scene() {
    let engine = scene();
    let settings = Settings::from_toml_str(
        r#"
[orchestrator]
startup_scene = 3

[values]
difficulty = "hard"
lives = 5
tutorial = false
"#,
    )
    .unwrap();
    let mut root = root_on(&engine, settings);
    root.start().await.unwrap();

    let config = root.config().unwrap();
    assert_eq!(config.len(), 3);
    assert_eq!(config.get_str("difficulty"), Some("hard"));
    assert_eq!(config.get_int("lives"), Some(5));
    assert_eq!(config.get_bool("tutorial"), Some(false));
    assert_eq!(config.get_str("missing"), None);
    assert_eq!(engine.loaded_scenes(), vec![3]);

    root.shutdown();
    assert!(root.config().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_startup_scene_when_disabled() {
    let engine = scene();
    let mut settings = Settings::default();
    settings.orchestrator.startup_scene = None;
    let mut root = root_on(&engine, settings);

    root.start().await.unwrap();
    assert!(root.is_ready());
    assert!(engine.loaded_scenes().is_empty());
}

#[test]
fn test_invalid_settings_rejected_at_construction() {
    let engine: SharedEngine = scene();
    let mut settings = Settings::default();
    settings.audio.sfx_capacity = 0;

    let result = GameRoot::new(engine, settings);
    assert!(matches!(result, Err(RootError::Settings(_))));
}
