use bevy_ecs::prelude::Resource;

/// Frame clock. `delta` is the scaled, clamped time of the current frame;
/// timers accumulate it. `frame` counts variable updates, `fixed_steps`
/// counts fixed-timestep passes across the whole run.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame: u64,
    pub fixed_steps: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame: 0,
            fixed_steps: 0,
        }
    }
}
