//! Frame driver and entity lifecycle.
//!
//! [`LifecycleScheduler`] owns the three schedules of a frame:
//!
//! 1. **update** – variable-timestep gameplay: bench interaction, animation
//!    advancement, the knight update and its child-motion propagation, then
//!    the audio/canvas forwarders.
//! 2. **fixed** – zero or more fixed-timestep passes, driven by an
//!    accumulator fed with the frame's scaled delta.
//! 3. **contacts** – the collision pass, once per frame, after movement.
//!
//! Entity lifecycle: entities join the scene through [`register`], which
//! names them in the [`SceneRegistry`]. Before [`start`] runs they only sit
//! there; `start` awakes every registered entity in registration order and
//! then starts the active ones, also in order. An entity registered after
//! the scene started gets its awake (and, when active, its start)
//! immediately. Awake and start fire at most once per entity, tracked on
//! its [`Lifecycle`] component. Deactivating an entity pauses its systems
//! but never re-fires either event on reactivation.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::lifecycle::Lifecycle;
use crate::events::audio::AudioCmd;
use crate::events::canvas::CanvasCmd;
use crate::events::collision::observe_log_contacts;
use crate::events::lifecycle::{AwakeEvent, StartEvent};
use crate::resources::contacts::ContactTracker;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputSnapshot, InputState};
use crate::resources::registry::{SceneError, SceneRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::actor::{
    actor_update, observe_actor_awake, observe_actor_start, observe_ground_contacts,
    propagate_actor_motion,
};
use crate::systems::animation::advance_animations;
use crate::systems::audio::{forward_audio_cmds, update_audio_cmds};
use crate::systems::bench::bench_interaction;
use crate::systems::collision::{collision_step, purge_entity_contacts};
use crate::systems::input::apply_input_snapshot;
use crate::systems::render::{forward_canvas_cmds, update_canvas_cmds};
use crate::systems::time::{count_fixed_step, update_world_time};

pub struct LifecycleScheduler {
    update: Schedule,
    fixed: Schedule,
    contacts: Schedule,
    /// Unspent frame time carried into the next fixed pass.
    accumulator: f32,
}

impl LifecycleScheduler {
    pub fn new() -> Self {
        let mut update = Schedule::default();
        update.add_systems(
            (
                bench_interaction,
                advance_animations,
                actor_update,
                propagate_actor_motion,
            )
                .chain(),
        );
        update.add_systems(
            (forward_audio_cmds, update_audio_cmds)
                .chain()
                .after(actor_update),
        );
        update.add_systems(
            (forward_canvas_cmds, update_canvas_cmds)
                .chain()
                .after(actor_update),
        );

        let mut fixed = Schedule::default();
        fixed.add_systems(count_fixed_step);

        let mut contacts = Schedule::default();
        contacts.add_systems(collision_step);

        LifecycleScheduler {
            update,
            fixed,
            contacts,
            accumulator: 0.0,
        }
    }

    /// Advance the world by one frame.
    ///
    /// The raw delta is clamped to the configured maximum before anything
    /// sees it, so a long stall never produces a catch-up burst.
    pub fn run_frame(&mut self, world: &mut World, snap: InputSnapshot, raw_dt: f32) {
        let max = world.resource::<GameConfig>().max_frame_delta;
        let dt = raw_dt.clamp(0.0, max);

        update_world_time(world, dt);
        apply_input_snapshot(world, snap);

        self.update.run(world);

        self.accumulator += world.resource::<WorldTime>().delta;
        let fixed_delta = world.resource::<GameConfig>().fixed_delta;
        while self.accumulator >= fixed_delta {
            self.fixed.run(world);
            self.accumulator -= fixed_delta;
        }

        self.contacts.run(world);
        world.clear_trackers();
    }
}

impl Default for LifecycleScheduler {
    fn default() -> Self {
        LifecycleScheduler::new()
    }
}

/// Insert the core resources and spawn the global observers. Call once on
/// a fresh world, before registering entities.
pub fn install_core(world: &mut World, config: GameConfig) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(ContactTracker::default());
    world.insert_resource(SceneRegistry::default());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<CanvasCmd>>();
    world.insert_resource(config);

    world.spawn(Observer::new(observe_actor_awake));
    world.spawn(Observer::new(observe_actor_start));
    world.spawn(Observer::new(observe_ground_contacts));
    world.spawn(Observer::new(observe_log_contacts));
    world.flush();
}

/// Register an entity under a scene name. On a started scene the entity is
/// awaked (and, when active, started) before this returns; on a pending
/// scene it waits for [`start`]. A duplicate name registers nothing.
pub fn register(world: &mut World, name: &str, entity: Entity) -> Result<(), SceneError> {
    world
        .resource_mut::<SceneRegistry>()
        .insert(name, entity)?;
    debug!("registered '{}' as {:?}", name, entity);

    if world.resource::<SceneRegistry>().is_started() {
        awake_entity(world, entity);
        if is_active(world, entity) {
            start_entity(world, entity);
        }
    }
    Ok(())
}

/// Run the scene's startup passes: awake everything registered, in order,
/// then start the active entities, in order.
pub fn start(world: &mut World) {
    let order: Vec<Entity> = world.resource::<SceneRegistry>().order().to_vec();
    for &entity in &order {
        awake_entity(world, entity);
    }
    for &entity in &order {
        if is_active(world, entity) {
            start_entity(world, entity);
        }
    }
    world.resource_mut::<SceneRegistry>().mark_started();
    info!("scene started with {} entities", order.len());
}

/// Remove an entity from the scene and the world. Its active contacts exit
/// first, so observers see the pairs close before the entity is gone from
/// the registry.
pub fn destroy(world: &mut World, entity: Entity) {
    purge_entity_contacts(world, entity);
    if let Some(name) = world.resource_mut::<SceneRegistry>().remove(entity) {
        debug!("destroyed '{}'", name);
    }
    world.despawn(entity);
}

/// Flip an entity's active flag. Neither awake nor start re-fires here;
/// only the registration-time and scene-start paths start entities.
pub fn set_active(world: &mut World, entity: Entity, active: bool) {
    if let Some(mut lifecycle) = world.get_mut::<Lifecycle>(entity) {
        lifecycle.active = active;
    }
}

fn is_active(world: &World, entity: Entity) -> bool {
    world
        .get::<Lifecycle>(entity)
        .map(|l| l.active)
        .unwrap_or(false)
}

fn awake_entity(world: &mut World, entity: Entity) {
    match world.get_mut::<Lifecycle>(entity) {
        Some(mut lifecycle) if !lifecycle.awaked => lifecycle.awaked = true,
        _ => return,
    }
    world.trigger(AwakeEvent { entity });
}

fn start_entity(world: &mut World, entity: Entity) {
    match world.get_mut::<Lifecycle>(entity) {
        Some(mut lifecycle) if !lifecycle.started => lifecycle.started = true,
        _ => return,
    }
    world.trigger(StartEvent { entity });
}
