//! Per-frame logical input resource.
//!
//! The host samples its real input device once per frame into an
//! [`InputSnapshot`] of logical buttons; applying the snapshot updates the
//! [`InputState`] resource and derives the edge flags. Key bindings are the
//! host's business, the core only sees booleans.

use bevy_ecs::prelude::*;

/// Boolean button state with press/release edges for the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolState {
    /// Held down this frame.
    pub active: bool,
    /// Went down this frame.
    pub just_pressed: bool,
    /// Went up this frame.
    pub just_released: bool,
}

impl BoolState {
    fn apply(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Raw logical button sample for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
    pub attack: bool,
    pub attack_up: bool,
    pub attack_down: bool,
    pub interact: bool,
}

/// Resource holding the per-frame state of every logical button.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
    pub dash: BoolState,
    pub attack: BoolState,
    pub attack_up: BoolState,
    pub attack_down: BoolState,
    pub interact: BoolState,
}

impl InputState {
    /// Fold one frame's snapshot into the button states.
    pub fn apply(&mut self, snap: &InputSnapshot) {
        self.left.apply(snap.left);
        self.right.apply(snap.right);
        self.jump.apply(snap.jump);
        self.dash.apply(snap.dash);
        self.attack.apply(snap.attack);
        self.attack_up.apply(snap.attack_up);
        self.attack_down.apply(snap.attack_down);
        self.interact.apply(snap.interact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_fire_on_transitions_only() {
        let mut input = InputState::default();

        input.apply(&InputSnapshot {
            jump: true,
            ..Default::default()
        });
        assert!(input.jump.active);
        assert!(input.jump.just_pressed);
        assert!(!input.jump.just_released);

        input.apply(&InputSnapshot {
            jump: true,
            ..Default::default()
        });
        assert!(input.jump.active);
        assert!(!input.jump.just_pressed);

        input.apply(&InputSnapshot::default());
        assert!(!input.jump.active);
        assert!(input.jump.just_released);

        input.apply(&InputSnapshot::default());
        assert!(!input.jump.just_released);
    }
}
