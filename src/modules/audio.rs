//! # Audio Module
//!
//! Binds the audio root object at init and builds two nodes under it:
//!
//! - `BGM`: one looping source for background music.
//! - `SFX`: the parent of a [`ResourcePool`] of one-shot [`SfxChannel`]s named `SFX_0`,
//!   `SFX_1`, ... The pool starts with one channel and grows up to `audio.sfx_capacity`.
//!
//! A channel counts as busy while the engine reports it playing. When every channel is busy
//! and the pool is full, the next effect cuts off the channel under the eviction cursor.

use super::AppContext;
use crate::engine::{AudioClip, AudioSourceId, ObjectId, SharedEngine};
use crate::settings::AudioSettings;
use async_trait::async_trait;
use module_framework::{Acquisition, BoxError, FrameworkError, Module, ModuleType, PoolHandle, ResourcePool};
use thiserror::Error;
use tracing::{debug, error, info};

const BGM_NODE_NAME: &str = "BGM";
const SFX_NODE_NAME: &str = "SFX";

/// Errors that can occur during audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The audio root object is not in the scene.
    #[error("Audio root object not found: {0}")]
    RootNotFound(String),

    /// The module has not been initialized, or was released.
    #[error("Audio module not initialized")]
    NotInitialized,

    /// The SFX pool could not be built.
    #[error("SFX pool error: {0}")]
    Pool(#[from] FrameworkError),
}

/// One pooled sound-effect source.
pub struct SfxChannel {
    engine: SharedEngine,
    object: ObjectId,
    source: AudioSourceId,
}

impl SfxChannel {
    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn source(&self) -> AudioSourceId {
        self.source
    }
}

impl PoolHandle for SfxChannel {
    fn is_busy(&self) -> bool {
        self.engine.is_playing(self.source)
    }

    fn interrupt(&mut self) {
        self.engine.stop(self.source);
    }
}

/// Where a sound effect ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfxPlayback {
    /// Index of the channel in the SFX pool.
    pub channel: usize,
    pub acquisition: Acquisition,
}

#[derive(Default)]
pub struct Audio {
    engine: Option<SharedEngine>,
    root: Option<ObjectId>,
    settings: AudioSettings,
    bgm: Option<AudioSourceId>,
    current_bgm: Option<AudioClip>,
    sfx: Option<ResourcePool<SfxChannel>>,
}

impl Audio {
    /// Plays a one-shot effect on a pooled channel.
    ///
    /// `volume` is scaled by `audio.sfx_volume`.
    pub fn play_sfx(&mut self, clip: &AudioClip, volume: f32) -> Result<SfxPlayback, AudioError> {
        let pool = self.sfx.as_mut().ok_or(AudioError::NotInitialized)?;
        let acquired = pool.acquire();
        let channel = &*acquired.handle;
        channel
            .engine
            .play(channel.source, clip, volume * self.settings.sfx_volume);

        debug!(clip = %clip.name, channel = acquired.index, kind = ?acquired.kind, "SFX played");
        Ok(SfxPlayback {
            channel: acquired.index,
            acquisition: acquired.kind,
        })
    }

    /// Switches background music. Does nothing if `clip` is already the current track.
    ///
    /// Returns whether the track changed. `volume` is scaled by `audio.bgm_volume`.
    pub fn play_bgm(&mut self, clip: &AudioClip, volume: f32) -> Result<bool, AudioError> {
        let (Some(engine), Some(bgm)) = (&self.engine, self.bgm) else {
            return Err(AudioError::NotInitialized);
        };
        if self.current_bgm.as_ref() == Some(clip) {
            return Ok(false);
        }

        engine.play(bgm, clip, volume * self.settings.bgm_volume);
        self.current_bgm = Some(clip.clone());
        info!(clip = %clip.name, "BGM switched");
        Ok(true)
    }

    pub fn stop_bgm(&mut self) -> Result<(), AudioError> {
        let (Some(engine), Some(bgm)) = (&self.engine, self.bgm) else {
            return Err(AudioError::NotInitialized);
        };
        engine.stop(bgm);
        self.current_bgm = None;
        Ok(())
    }

    pub fn current_bgm(&self) -> Option<&AudioClip> {
        self.current_bgm.as_ref()
    }

    pub fn bgm_source(&self) -> Option<AudioSourceId> {
        self.bgm
    }

    pub fn sfx_pool(&self) -> Option<&ResourcePool<SfxChannel>> {
        self.sfx.as_ref()
    }

    fn setup_bgm(engine: &SharedEngine, root: ObjectId) -> AudioSourceId {
        let node = engine.create_object(BGM_NODE_NAME, Some(root));
        engine.add_audio_source(node, true)
    }

    fn setup_sfx_pool(
        engine: &SharedEngine,
        root: ObjectId,
        capacity: usize,
    ) -> Result<ResourcePool<SfxChannel>, FrameworkError> {
        let sfx_root = engine.create_object(SFX_NODE_NAME, Some(root));
        let engine = engine.clone();
        ResourcePool::new(capacity, move |index| {
            let object = engine.create_object(&format!("SFX_{index}"), Some(sfx_root));
            let source = engine.add_audio_source(object, false);
            debug!(index, "SFX channel created");
            SfxChannel {
                engine: engine.clone(),
                object,
                source,
            }
        })
    }
}

#[async_trait]
impl Module for Audio {
    type Context = AppContext;

    async fn init(&mut self, ctx: &AppContext) -> Result<(), BoxError> {
        let settings = &ctx.settings.audio;
        let Some(root) = ctx.engine.find_object(&settings.root_name) else {
            error!(root = %settings.root_name, "Audio root object missing from scene");
            return Err(AudioError::RootNotFound(settings.root_name.clone()).into());
        };

        let bgm = Self::setup_bgm(&ctx.engine, root);
        let sfx = Self::setup_sfx_pool(&ctx.engine, root, settings.sfx_capacity)
            .map_err(AudioError::from)?;

        self.engine = Some(ctx.engine.clone());
        self.root = Some(root);
        self.settings = settings.clone();
        self.bgm = Some(bgm);
        self.sfx = Some(sfx);
        info!(%root, sfx_capacity = settings.sfx_capacity, "Audio module initialized");
        Ok(())
    }

    fn release(&mut self) -> Result<(), BoxError> {
        info!("Audio module releasing resources");
        if let (Some(engine), Some(root)) = (&self.engine, self.root) {
            for name in [BGM_NODE_NAME, SFX_NODE_NAME] {
                if let Some(node) = engine.find_child(root, name) {
                    engine.destroy_object(node);
                }
            }
        }
        self.sfx = None;
        self.bgm = None;
        self.current_bgm = None;
        self.root = None;
        self.engine = None;
        Ok(())
    }
}

impl ModuleType for Audio {
    const NAME: &'static str = "Audio";
    const PRIORITY: Option<i32> = Some(2);
}
