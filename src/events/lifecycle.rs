//! Entity lifecycle events.
//!
//! The scheduler triggers [`AwakeEvent`] once per entity when it is first
//! registered, and [`StartEvent`] once when the entity becomes active for
//! the first time. Observers hang game-specific setup off these, keeping
//! spawn-time wiring out of the per-frame systems.
//!
//! Ordering: every entity registered before the world starts gets its
//! awake before any entity gets its start. Entities registered later get
//! both, in order, at registration time.

use bevy_ecs::prelude::*;

/// Fired once when an entity is registered with the scene.
#[derive(Event, Debug, Clone, Copy)]
pub struct AwakeEvent {
    pub entity: Entity,
}

/// Fired once when a registered entity first becomes active.
#[derive(Event, Debug, Clone, Copy)]
pub struct StartEvent {
    pub entity: Entity,
}
