//! Per-entity lifecycle flags.
//!
//! Every entity registered with the [`SceneRegistry`](crate::resources::registry::SceneRegistry)
//! carries a [`Lifecycle`] component. The scheduler uses it to run `awake`
//! exactly once per entity and `start` exactly once per *active* entity, and
//! the per-frame systems skip entities whose `active` flag is cleared.

use bevy_ecs::prelude::Component;

/// Lifecycle bookkeeping for a registered entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct Lifecycle {
    /// Inactive entities are skipped by update, animation and collision passes.
    pub active: bool,
    /// Set once the awake event has been delivered.
    pub awaked: bool,
    /// Set once the start event has been delivered.
    pub started: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            active: true,
            awaked: false,
            started: false,
        }
    }
}

impl Lifecycle {
    /// Create the flags for an entity that starts out inactive.
    pub fn inactive() -> Self {
        Self {
            active: false,
            ..Self::default()
        }
    }
}
