//! In-memory engine used by the demo binary and the tests.
//!
//! Objects form a simple tree, assets are registered by path up front, and audio sources play
//! for `clip.frames` calls to [`HeadlessEngine::advance_frame`] (forever when looping).

use super::{AssetId, AudioClip, AudioSourceId, Engine, ObjectId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

#[derive(Debug)]
struct ObjectNode {
    name: String,
    parent: Option<ObjectId>,
}

#[derive(Debug)]
struct SourceState {
    object: ObjectId,
    looping: bool,
    clip: Option<AudioClip>,
    volume: f32,
    remaining: u32,
    playing: bool,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    objects: HashMap<ObjectId, ObjectNode>,
    assets: HashMap<String, AssetId>,
    sources: HashMap<AudioSourceId, SourceState>,
    loaded_scenes: Vec<usize>,
    frame: u64,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn descendants(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut found = vec![root];
        let mut cursor = 0;
        while cursor < found.len() {
            let parent = found[cursor];
            found.extend(
                self.objects
                    .iter()
                    .filter(|(_, node)| node.parent == Some(parent))
                    .map(|(id, _)| *id),
            );
            cursor += 1;
        }
        found
    }
}

/// Deterministic engine without rendering or audio output.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    state: Mutex<State>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root-level object, as if it had been placed in the scene.
    pub fn with_object(self, name: &str) -> Self {
        self.create_object(name, None);
        self
    }

    /// Makes `path` loadable through [`Engine::load_asset`].
    pub fn with_asset(self, path: &str) -> Self {
        {
            let mut state = self.lock();
            let id = AssetId(state.next_id());
            state.assets.insert(path.to_string(), id);
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances one tick: non-looping sources count down and stop when their clip ends.
    pub fn advance_frame(&self) {
        let mut state = self.lock();
        state.frame += 1;
        for source in state.sources.values_mut() {
            if !source.playing || source.looping {
                continue;
            }
            source.remaining = source.remaining.saturating_sub(1);
            if source.remaining == 0 {
                source.playing = false;
            }
        }
    }

    pub fn frame(&self) -> u64 {
        self.lock().frame
    }

    /// Scene indices passed to [`Engine::load_scene`], in call order.
    pub fn loaded_scenes(&self) -> Vec<usize> {
        self.lock().loaded_scenes.clone()
    }

    pub fn object_exists(&self, object: ObjectId) -> bool {
        self.lock().objects.contains_key(&object)
    }

    pub fn object_name(&self, object: ObjectId) -> Option<String> {
        self.lock().objects.get(&object).map(|node| node.name.clone())
    }

    pub fn parent_of(&self, object: ObjectId) -> Option<ObjectId> {
        self.lock().objects.get(&object).and_then(|node| node.parent)
    }

    /// Names of the direct children of `parent`, sorted.
    pub fn child_names(&self, parent: ObjectId) -> Vec<String> {
        let state = self.lock();
        let mut names: Vec<String> = state
            .objects
            .values()
            .filter(|node| node.parent == Some(parent))
            .map(|node| node.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Clip currently assigned to `source`, playing or not.
    pub fn clip_of(&self, source: AudioSourceId) -> Option<AudioClip> {
        self.lock()
            .sources
            .get(&source)
            .and_then(|s| s.clip.clone())
    }

    pub fn volume_of(&self, source: AudioSourceId) -> Option<f32> {
        self.lock().sources.get(&source).map(|s| s.volume)
    }

    pub fn playing_count(&self) -> usize {
        self.lock().sources.values().filter(|s| s.playing).count()
    }
}

#[async_trait]
impl Engine for HeadlessEngine {
    fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.lock()
            .objects
            .iter()
            .find(|(_, node)| node.parent.is_none() && node.name == name)
            .map(|(id, _)| *id)
    }

    fn find_child(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        self.lock()
            .objects
            .iter()
            .find(|(_, node)| node.parent == Some(parent) && node.name == name)
            .map(|(id, _)| *id)
    }

    fn create_object(&self, name: &str, parent: Option<ObjectId>) -> ObjectId {
        let mut state = self.lock();
        let id = ObjectId(state.next_id());
        state.objects.insert(
            id,
            ObjectNode {
                name: name.to_string(),
                parent,
            },
        );
        debug!(%id, name, "Object created");
        id
    }

    fn destroy_object(&self, object: ObjectId) {
        let mut state = self.lock();
        let doomed = state.descendants(object);
        for id in &doomed {
            state.objects.remove(id);
        }
        state.sources.retain(|_, source| !doomed.contains(&source.object));
        debug!(%object, count = doomed.len(), "Objects destroyed");
    }

    async fn load_asset(&self, path: &str) -> Option<AssetId> {
        // Loading completes on a later poll, like a real async resource request.
        tokio::task::yield_now().await;
        self.lock().assets.get(path).copied()
    }

    fn instantiate(&self, asset: AssetId, parent: ObjectId) -> ObjectId {
        let name = {
            let state = self.lock();
            state
                .assets
                .iter()
                .find(|(_, id)| **id == asset)
                .map(|(path, _)| path.rsplit('/').next().unwrap_or(path).to_string())
                .unwrap_or_else(|| format!("asset#{}", asset.0))
        };
        self.create_object(&name, Some(parent))
    }

    fn add_audio_source(&self, object: ObjectId, looping: bool) -> AudioSourceId {
        let mut state = self.lock();
        let id = AudioSourceId(state.next_id());
        state.sources.insert(
            id,
            SourceState {
                object,
                looping,
                clip: None,
                volume: 1.0,
                remaining: 0,
                playing: false,
            },
        );
        id
    }

    fn play(&self, source: AudioSourceId, clip: &AudioClip, volume: f32) {
        if let Some(state) = self.lock().sources.get_mut(&source) {
            state.clip = Some(clip.clone());
            state.volume = volume;
            state.remaining = clip.frames;
            state.playing = state.looping || clip.frames > 0;
        }
    }

    fn stop(&self, source: AudioSourceId) {
        if let Some(state) = self.lock().sources.get_mut(&source) {
            state.playing = false;
            state.remaining = 0;
        }
    }

    fn is_playing(&self, source: AudioSourceId) -> bool {
        self.lock()
            .sources
            .get(&source)
            .is_some_and(|state| state.playing)
    }

    fn load_scene(&self, index: usize) {
        info!(index, "Loading scene");
        self.lock().loaded_scenes.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objects_form_a_tree() {
        let engine = HeadlessEngine::new().with_object("[Audio]");
        let root = engine.find_object("[Audio]").unwrap();
        let child = engine.create_object("SFX", Some(root));
        let grandchild = engine.create_object("SFX_0", Some(child));

        assert_eq!(engine.find_child(root, "SFX"), Some(child));
        assert_eq!(engine.find_object("SFX"), None);

        engine.destroy_object(child);
        assert!(engine.object_exists(root));
        assert!(!engine.object_exists(grandchild));
    }

    #[test]
    fn test_one_shot_source_stops_after_clip_length() {
        let engine = HeadlessEngine::new();
        let object = engine.create_object("SFX_0", None);
        let source = engine.add_audio_source(object, false);

        engine.play(source, &AudioClip::new("click", 2), 0.5);
        assert!(engine.is_playing(source));
        engine.advance_frame();
        assert!(engine.is_playing(source));
        engine.advance_frame();
        assert!(!engine.is_playing(source));
        assert_eq!(engine.volume_of(source), Some(0.5));
    }

    #[test]
    fn test_looping_source_plays_until_stopped() {
        let engine = HeadlessEngine::new();
        let object = engine.create_object("BGM", None);
        let source = engine.add_audio_source(object, true);

        engine.play(source, &AudioClip::new("theme", 1), 1.0);
        for _ in 0..10 {
            engine.advance_frame();
        }
        assert!(engine.is_playing(source));
        engine.stop(source);
        assert!(!engine.is_playing(source));
    }

    #[tokio::test]
    async fn test_missing_asset_is_none() {
        let engine = HeadlessEngine::new().with_asset("Panels/MainMenu");
        assert!(engine.load_asset("Panels/MainMenu").await.is_some());
        assert!(engine.load_asset("Panels/Missing").await.is_none());
    }
}
