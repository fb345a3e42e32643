//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can
//! be reused by multiple entities. Systems look up an animation by string
//! key and drive playback from the immutable parameters stored here; the
//! playing state itself lives on each entity's
//! [`crate::components::animator::Animator`].
//!
//! A catalog can also be loaded from JSON, one entry per key:
//!
//! ```json
//! { "Idle": { "frame_count": 9, "frame_duration": 0.05, "looped": true } }
//! ```

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing one animation clip.
///
/// Fields are intentionally simple to keep the format engine-agnostic:
/// playback needs a frame count, a per-frame duration and a loop flag,
/// nothing about the backing images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Seconds each frame is shown.
    pub frame_duration: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    pub fn new(frame_count: usize, frame_duration: f32, looped: bool) -> Self {
        AnimationResource {
            frame_count,
            frame_duration,
            looped,
        }
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        AnimationStore::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Parse a JSON catalog and merge it into the store. Existing keys are
    /// replaced.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let parsed: FxHashMap<String, AnimationResource> = serde_json::from_str(json)?;
        let count = parsed.len();
        self.animations.extend(parsed);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = AnimationStore::new();
        store.insert("Idle", AnimationResource::new(9, 0.05, true));
        let anim = store.get("Idle").unwrap();
        assert_eq!(anim.frame_count, 9);
        assert!(anim.looped);
        assert!(store.get("Missing").is_none());
    }

    #[test]
    fn test_merge_json_replaces_existing_keys() {
        let mut store = AnimationStore::new();
        store.insert("Dash", AnimationResource::new(4, 0.1, true));

        let added = store
            .merge_json(
                r#"{
                    "Dash": { "frame_count": 8, "frame_duration": 0.05, "looped": false },
                    "Sit": { "frame_count": 6, "frame_duration": 0.05, "looped": false }
                }"#,
            )
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Dash").unwrap().frame_count, 8);
        assert!(!store.get("Dash").unwrap().looped);
    }

    #[test]
    fn test_merge_json_rejects_malformed_input() {
        let mut store = AnimationStore::new();
        assert!(store.merge_json("not json").is_err());
        assert!(store.is_empty());
    }
}
