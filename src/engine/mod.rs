//! # Engine Services
//!
//! The [`Engine`] trait is the boundary between the game modules and whatever engine hosts
//! them. Modules only ever see this trait, injected through
//! [`AppContext`](crate::modules::AppContext), so they can be driven by a real engine binding
//! or by the in-memory [`HeadlessEngine`](headless::HeadlessEngine).
//!
//! The surface is deliberately opaque: objects, assets and audio sources are plain ids, and
//! every lookup that can miss returns `Option`.

pub mod headless;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub use headless::HeadlessEngine;

/// A scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// A loaded, instantiable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub u64);

/// An audio emitter attached to a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioSourceId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// A playable sound. `frames` is its length in engine ticks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioClip {
    pub name: String,
    pub frames: u32,
}

impl AudioClip {
    pub fn new(name: impl Into<String>, frames: u32) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }
}

/// Shared handle to the engine services.
pub type SharedEngine = Arc<dyn Engine>;

/// Engine services consumed by the modules.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Finds a root-level scene object by name.
    fn find_object(&self, name: &str) -> Option<ObjectId>;

    /// Finds a direct child of `parent` by name.
    fn find_child(&self, parent: ObjectId, name: &str) -> Option<ObjectId>;

    fn create_object(&self, name: &str, parent: Option<ObjectId>) -> ObjectId;

    /// Destroys an object and all of its descendants.
    fn destroy_object(&self, object: ObjectId);

    /// Loads a named asset. `None` means the asset does not exist.
    async fn load_asset(&self, path: &str) -> Option<AssetId>;

    /// Creates a scene object from a loaded asset under `parent`.
    fn instantiate(&self, asset: AssetId, parent: ObjectId) -> ObjectId;

    fn add_audio_source(&self, object: ObjectId, looping: bool) -> AudioSourceId;

    /// Starts `clip` on `source`, replacing whatever it was playing.
    fn play(&self, source: AudioSourceId, clip: &AudioClip, volume: f32);

    fn stop(&self, source: AudioSourceId);

    fn is_playing(&self, source: AudioSourceId) -> bool;

    /// Replaces the active scene with the scene at `index` in the build list.
    fn load_scene(&self, index: usize);
}
