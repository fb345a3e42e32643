//! Animation playback state.
//!
//! The [`Animator`] component tracks which action of the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) an
//! entity is currently playing and how far along it is. Frame advancement
//! happens in [`crate::systems::animation::advance_animations`]; gameplay code
//! reads `finished`/`current_frame` and requests new actions through
//! [`Animator::change_animation`].
//!
//! The actual frame images live with the rendering collaborator; the core
//! only indexes by action name and frame number.

use bevy_ecs::prelude::Component;
use log::{debug, warn};

use crate::resources::animationstore::AnimationStore;

/// Playback state plus facing for one entity.
///
/// `flip_x == true` means the entity faces right (sprite art faces left).
#[derive(Debug, Clone, Component, Default)]
pub struct Animator {
    /// Key into the [`AnimationStore`]; `None` until the first change.
    pub current: Option<String>,
    pub frame_index: usize,
    /// Seconds accumulated inside the current frame.
    pub elapsed: f32,
    /// Set when a non-looping animation reaches its last frame.
    pub finished: bool,
    pub flip_x: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to another action, resetting frame, elapsed time and the
    /// finished flag. An unknown name is a configuration error: it logs and
    /// leaves the current animation untouched.
    pub fn change_animation(&mut self, key: &str, store: &AnimationStore) {
        if store.get(key).is_none() {
            warn!("unknown animation '{}', keeping current", key);
            return;
        }
        debug!("animation -> {}", key);
        self.current = Some(key.to_string());
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }

    /// Current frame index; 0 when no animation is set.
    pub fn current_frame(&self) -> usize {
        if self.current.is_some() {
            self.frame_index
        } else {
            0
        }
    }

    /// Whether the current non-looping animation has completed. Degrades to
    /// `false` when no animation is set.
    pub fn is_finished(&self) -> bool {
        self.current.is_some() && self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::{AnimationResource, AnimationStore};

    fn store_with(key: &str, frames: usize) -> AnimationStore {
        let mut store = AnimationStore::new();
        store.insert(key, AnimationResource::new(frames, 0.05, false));
        store
    }

    #[test]
    fn test_change_animation_resets_playback() {
        let store = store_with("Idle", 4);
        let mut anim = Animator::new();
        anim.frame_index = 3;
        anim.elapsed = 0.04;
        anim.finished = true;
        anim.change_animation("Idle", &store);
        assert_eq!(anim.current.as_deref(), Some("Idle"));
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed, 0.0);
        assert!(!anim.finished);
    }

    #[test]
    fn test_change_to_unknown_animation_is_noop() {
        let store = store_with("Idle", 4);
        let mut anim = Animator::new();
        anim.change_animation("Idle", &store);
        anim.frame_index = 2;
        anim.change_animation("DoesNotExist", &store);
        assert_eq!(anim.current.as_deref(), Some("Idle"));
        assert_eq!(anim.frame_index, 2);
    }

    #[test]
    fn test_reads_degrade_without_animation() {
        let mut anim = Animator::new();
        anim.frame_index = 7;
        anim.finished = true;
        assert_eq!(anim.current_frame(), 0);
        assert!(!anim.is_finished());
    }
}
