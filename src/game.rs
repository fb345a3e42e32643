//! Demo stage assembly: the knight, a ground slab and a bench, plus the
//! default animation catalog and sound bank they reference.
//!
//! The frame images and sound files live with the host; the core only
//! knows names, frame counts and timings.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::actor::ActorController;
use crate::components::animator::Animator;
use crate::components::bench::BenchSeat;
use crate::components::collider::Collider;
use crate::components::lifecycle::Lifecycle;
use crate::components::mapposition::MapPosition;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::audio::SoundBank;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputSnapshot;
use crate::resources::registry::SceneError;
use crate::scheduler;

/// Animation catalog of the shipped knight. Loops for the sustained
/// actions, one-shots for everything transitional; effect sheets last.
pub fn default_animation_catalog() -> AnimationStore {
    let mut store = AnimationStore::new();

    store.insert("Idle", AnimationResource::new(9, 0.05, true));
    store.insert("WalkStart", AnimationResource::new(6, 0.08, false));
    store.insert("WalkLoop", AnimationResource::new(8, 0.05, true));
    store.insert("Jump", AnimationResource::new(6, 0.05, false));
    store.insert("JumpLoop", AnimationResource::new(3, 0.05, true));
    store.insert("JumpLand", AnimationResource::new(6, 0.05, false));
    store.insert("DoubleJump", AnimationResource::new(8, 0.05, false));
    store.insert("Dash", AnimationResource::new(8, 0.05, false));
    store.insert("JumpDash", AnimationResource::new(8, 0.05, false));
    store.insert("Attack", AnimationResource::new(6, 0.05, false));
    store.insert("AttackTwice", AnimationResource::new(6, 0.05, false));
    store.insert("AttackTop", AnimationResource::new(6, 0.05, false));
    store.insert("AttackBottom", AnimationResource::new(6, 0.05, false));
    store.insert("JumpAttack", AnimationResource::new(6, 0.05, false));
    store.insert("JumpAttackTwice", AnimationResource::new(6, 0.05, false));
    store.insert("JumpAttackTop", AnimationResource::new(6, 0.05, false));
    store.insert("JumpAttackBottom", AnimationResource::new(6, 0.05, false));
    store.insert("Sit", AnimationResource::new(6, 0.05, false));

    store.insert("DashEffect", AnimationResource::new(8, 0.05, false));
    store.insert("DoubleJumpEffect", AnimationResource::new(4, 0.05, false));
    store.insert("AttackEffect", AnimationResource::new(1, 0.05, false));
    store.insert("AttackTwiceEffect", AnimationResource::new(1, 0.05, false));
    store.insert("AttackTopEffect", AnimationResource::new(1, 0.05, false));
    store.insert("AttackBottomEffect", AnimationResource::new(1, 0.05, false));

    store
}

/// Sound names the states play. "sword" is a group; each swing picks one
/// member at random.
pub fn default_sound_bank() -> SoundBank {
    let mut bank = SoundBank::new();
    for id in ["run", "dash", "land", "jump", "doublejump", "falling"] {
        bank.insert(id);
    }
    bank.insert_group("sword", ["sword1", "sword2", "sword3"]);
    bank
}

/// Spawn and register the demo stage. The knight starts in the air and
/// falls onto the ground slab.
pub fn setup_stage(world: &mut World) -> Result<(), SceneError> {
    world.insert_resource(default_animation_catalog());
    world.insert_resource(default_sound_bank());

    let tuning = world.resource::<GameConfig>().tuning;

    let ground = world
        .spawn((
            MapPosition::new(500.0, 600.0),
            Collider::new_box(1000.0, 150.0).with_tag("Ground"),
            Lifecycle::default(),
        ))
        .id();
    scheduler::register(world, "Ground", ground)?;

    let bench = world
        .spawn((
            MapPosition::new(200.0, 490.0),
            Collider::new_box(150.0, 60.0)
                .with_offset(Vec2::new(0.0, -10.0))
                .with_tag("Bench"),
            BenchSeat::default(),
            Lifecycle::default(),
        ))
        .id();
    scheduler::register(world, "Bench", bench)?;

    let player = world
        .spawn((
            MapPosition::new(200.0, 100.0),
            Collider::new_box(60.0, 120.0),
            Animator::new(),
            ActorController::new(tuning),
            Lifecycle::default(),
        ))
        .id();
    scheduler::register(world, "Player", player)?;

    Ok(())
}

/// Canned input track for the headless demo: fall, run, jump with a double
/// jump, dash, a two-hit combo, walk back and sit on the bench.
pub fn demo_script(frame: u64) -> InputSnapshot {
    match frame {
        40..=99 => InputSnapshot {
            right: true,
            ..Default::default()
        },
        100..=109 => InputSnapshot {
            jump: true,
            ..Default::default()
        },
        115..=125 => InputSnapshot {
            jump: true,
            ..Default::default()
        },
        150..=152 => InputSnapshot {
            dash: true,
            ..Default::default()
        },
        200..=203 => InputSnapshot {
            attack: true,
            ..Default::default()
        },
        210..=213 => InputSnapshot {
            attack: true,
            ..Default::default()
        },
        260..=330 => InputSnapshot {
            left: true,
            ..Default::default()
        },
        360 => InputSnapshot {
            interact: true,
            ..Default::default()
        },
        _ => InputSnapshot::default(),
    }
}
