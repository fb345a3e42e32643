//! Animation playback system.
//!
//! Advances every [`Animator`](crate::components::animator::Animator) by the
//! frame's delta, looking the clip parameters up in the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore).
//! Looping clips wrap to frame zero; non-looping clips hold their last frame
//! and raise the `finished` flag the states poll for their transitions.
//!
//! Runs before the actor update so a state sees `finished` the same frame
//! the last frame's duration elapses.

use bevy_ecs::prelude::*;

use crate::components::animator::Animator;
use crate::components::lifecycle::Lifecycle;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback for all active entities.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up clip data from [`AnimationStore`]; an animator without a
///   current key, or with a key missing from the store, is left untouched.
/// - Mutates frame index, carried elapsed time and the finished flag.
pub fn advance_animations(
    mut query: Query<(&mut Animator, &Lifecycle)>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut animator, lifecycle) in query.iter_mut() {
        if !lifecycle.active {
            continue;
        }
        let Some(key) = animator.current.clone() else {
            continue;
        };
        let Some(clip) = store.get(&key) else {
            continue;
        };
        if clip.frame_count == 0 {
            continue;
        }
        if animator.finished {
            continue;
        }

        animator.elapsed += time.delta;
        while animator.elapsed >= clip.frame_duration {
            animator.elapsed -= clip.frame_duration;
            animator.frame_index += 1;

            if animator.frame_index >= clip.frame_count {
                if clip.looped {
                    animator.frame_index = 0;
                } else {
                    animator.frame_index = clip.frame_count - 1; // stay on last frame
                    animator.finished = true;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationResource;

    fn make_world(delta: f32) -> World {
        let mut world = World::new();
        let mut store = AnimationStore::new();
        store.insert("Loop", AnimationResource::new(4, 0.05, true));
        store.insert("Once", AnimationResource::new(3, 0.05, false));
        world.insert_resource(store);
        world.insert_resource(WorldTime {
            delta,
            ..Default::default()
        });
        world
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(advance_animations);
        schedule.run(world);
    }

    #[test]
    fn test_looping_clip_wraps_to_frame_zero() {
        let mut world = make_world(0.05);
        let mut animator = Animator::default();
        animator.current = Some("Loop".to_string());
        let id = world.spawn((animator, Lifecycle::default())).id();

        for _ in 0..4 {
            tick(&mut world);
        }
        let animator = world.get::<Animator>(id).unwrap();
        assert_eq!(animator.frame_index, 0);
        assert!(!animator.finished);
    }

    #[test]
    fn test_one_shot_clip_holds_last_frame_and_finishes() {
        let mut world = make_world(0.05);
        let mut animator = Animator::default();
        animator.current = Some("Once".to_string());
        let id = world.spawn((animator, Lifecycle::default())).id();

        for _ in 0..10 {
            tick(&mut world);
        }
        let animator = world.get::<Animator>(id).unwrap();
        assert_eq!(animator.frame_index, 2);
        assert!(animator.finished);
    }

    #[test]
    fn test_large_delta_advances_multiple_frames() {
        let mut world = make_world(0.12);
        let mut animator = Animator::default();
        animator.current = Some("Loop".to_string());
        let id = world.spawn((animator, Lifecycle::default())).id();

        tick(&mut world);
        // 0.12s at 0.05s per frame crosses two frame boundaries.
        let animator = world.get::<Animator>(id).unwrap();
        assert_eq!(animator.frame_index, 2);
    }

    #[test]
    fn test_inactive_entity_does_not_advance() {
        let mut world = make_world(0.05);
        let mut animator = Animator::default();
        animator.current = Some("Loop".to_string());
        let id = world.spawn((animator, Lifecycle::inactive())).id();

        tick(&mut world);
        assert_eq!(world.get::<Animator>(id).unwrap().frame_index, 0);
    }

    #[test]
    fn test_missing_clip_is_ignored() {
        let mut world = make_world(0.05);
        let mut animator = Animator::default();
        animator.current = Some("Nope".to_string());
        let id = world.spawn((animator, Lifecycle::default())).id();

        tick(&mut world);
        assert_eq!(world.get::<Animator>(id).unwrap().frame_index, 0);
    }
}
