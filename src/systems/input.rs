//! Input application.
//!
//! The host samples its devices into an
//! [`InputSnapshot`](crate::resources::input::InputSnapshot) once per frame
//! and hands it to [`apply_input_snapshot`] before the update schedule
//! runs, so every system in the frame sees one coherent button state with
//! edges relative to the previous frame.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputSnapshot, InputState};

/// Fold this frame's snapshot into the `InputState` resource.
pub fn apply_input_snapshot(world: &mut World, snap: InputSnapshot) {
    let mut input = world.resource_mut::<InputState>();
    input.apply(&snap);
}
