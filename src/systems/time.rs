//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the clamped frame delta in seconds. The function
/// applies the current `time_scale`, writes `elapsed` and `delta` and
/// advances the frame counter.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame += 1;
}

/// Count one fixed-timestep pass. Runs inside the fixed schedule so tests
/// and diagnostics can observe how many steps a frame produced.
pub fn count_fixed_step(mut time: ResMut<WorldTime>) {
    time.fixed_steps += 1;
}
