//! Knight controller component: action-state machine plus the motion state
//! shared by every action (jump physics, dash momentum, combo bookkeeping).
//!
//! The component itself is data only. Per-state behavior lives in
//! [`crate::systems::actorstates`] as plain update functions dispatched on
//! [`ActorState`], and the per-tick integration (momentum, gravity, ground
//! snap) lives in [`crate::systems::actor`].
//!
//! # Architecture
//!
//! - **One active state** – tracked by a [`StateMachine<ActorState>`] which
//!   also remembers the previous state so follow-up states can inherit
//!   context (walk decay seed, attack grounded flag).
//! - **Scratch blocks** – each family of states owns a small struct of
//!   working values ([`WalkScratch`], [`DashScratch`], ...) reset by that
//!   family's enter hook. Exit hooks must leave nothing armed for the next
//!   state.
//! - **Tuning** – all constants grouped in [`ActorTuning`], overridable from
//!   the INI config (see [`crate::resources::gameconfig`]).

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::statemachine::StateMachine;

/// Action states of the knight. Variant names double as debug labels;
/// the animation key for each is given by [`ActorState::animation_key`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActorState {
    Idle,
    WalkStart,
    WalkLoop,
    JumpStart,
    JumpLoop,
    JumpLand,
    DoubleJump,
    Dash,
    JumpDash,
    Attack,
    AttackTwice,
    AttackTop,
    AttackBottom,
    JumpAttack,
    JumpAttackTwice,
    JumpAttackTop,
    JumpAttackBottom,
    Sit,
}

impl ActorState {
    /// Key of the animation requested when this state is entered.
    pub fn animation_key(self) -> &'static str {
        match self {
            ActorState::Idle => "Idle",
            ActorState::WalkStart => "WalkStart",
            ActorState::WalkLoop => "WalkLoop",
            ActorState::JumpStart => "Jump",
            ActorState::JumpLoop => "JumpLoop",
            ActorState::JumpLand => "JumpLand",
            ActorState::DoubleJump => "DoubleJump",
            ActorState::Dash => "Dash",
            ActorState::JumpDash => "JumpDash",
            ActorState::Attack => "Attack",
            ActorState::AttackTwice => "AttackTwice",
            ActorState::AttackTop => "AttackTop",
            ActorState::AttackBottom => "AttackBottom",
            ActorState::JumpAttack => "JumpAttack",
            ActorState::JumpAttackTwice => "JumpAttackTwice",
            ActorState::JumpAttackTop => "JumpAttackTop",
            ActorState::JumpAttackBottom => "JumpAttackBottom",
            ActorState::Sit => "Sit",
        }
    }

    /// Airborne attack variants return to `JumpLoop` when finished.
    pub fn is_air_attack(self) -> bool {
        matches!(
            self,
            ActorState::JumpAttack
                | ActorState::JumpAttackTwice
                | ActorState::JumpAttackTop
                | ActorState::JumpAttackBottom
        )
    }

    /// Dash variants share movement and after-image handling.
    pub fn is_dash(self) -> bool {
        matches!(self, ActorState::Dash | ActorState::JumpDash)
    }
}

/// Movement and combat constants. Defaults reproduce the shipped knight;
/// the config file may override individual fields.
#[derive(Clone, Copy, Debug)]
pub struct ActorTuning {
    /// Upward velocity applied on jump entry (positive magnitude).
    pub jump_force: f32,
    /// Extra upward velocity per tick while the jump button stays held.
    pub jump_extra_force: f32,
    /// Maximum accumulated hold time that still grants extra force (seconds).
    pub jump_hold_max: f32,
    /// Velocity gained per tick while airborne. +y points down.
    pub gravity: f32,
    /// Lateral distance per tick while walking or strafing.
    pub walk_speed: f32,
    /// Window over which a dash-seeded walk speed decays back to normal.
    pub walk_decay_window: f32,
    /// Lateral distance per tick during a dash.
    pub dash_speed: f32,
    /// Number of moving ticks in a dash.
    pub dash_ticks: u32,
    /// Residual lateral push magnitude set when a dash exits.
    pub dash_momentum: f32,
    /// Window over which dash momentum decays linearly to zero.
    pub momentum_window: f32,
    /// Seconds after an attack hit during which a re-press chains the combo.
    pub combo_window: f32,
    /// Seconds after touching down before a re-jump is accepted early.
    pub land_buffer: f32,
    /// Double jump launch force as a fraction of `jump_force`.
    pub double_jump_scale: f32,
    /// Double jump hold force as a fraction of `jump_extra_force`.
    pub double_jump_hold_scale: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        ActorTuning {
            jump_force: 12.0,
            jump_extra_force: 0.5,
            jump_hold_max: 0.25,
            gravity: 0.7,
            walk_speed: 10.0,
            walk_decay_window: 0.3,
            dash_speed: 35.0,
            dash_ticks: 8,
            dash_momentum: 15.0,
            momentum_window: 0.2,
            combo_window: 0.3,
            land_buffer: 0.05,
            double_jump_scale: 0.9,
            double_jump_hold_scale: 0.95,
        }
    }
}

/// Working values for `WalkStart`/`WalkLoop`. When the walk was entered out
/// of a dash the seed speed starts at half the dash exit speed and decays
/// back to `walk_speed` over `walk_decay_window`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkScratch {
    pub from_dash: bool,
    pub seed_speed: f32,
    pub decay_elapsed: f32,
}

/// Working values for `Dash`/`JumpDash`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DashScratch {
    /// +1.0 right, -1.0 left. Set from facing on entry.
    pub direction: f32,
    /// Moving ticks consumed so far.
    pub progress: u32,
}

/// Working values for `JumpLand`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LandScratch {
    pub elapsed: f32,
}

/// Working values shared by all attack states.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackScratch {
    /// Hit already triggered this swing (sound + effect fire once).
    pub hit_done: bool,
    /// Grounded flag captured at entry; finish transitions use this, not
    /// the live flag, so a swing that drifts off a ledge still lands in
    /// the state family it started from.
    pub was_grounded: bool,
    pub combo_open: bool,
    pub combo_elapsed: f32,
    /// The attack button must be seen released before a re-press chains.
    pub released: bool,
}

/// Working values for `Sit`: the seat entity and the local offset the
/// knight is anchored to while seated.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeatScratch {
    pub bench: Option<Entity>,
    pub offset: Vec2,
}

/// Effect frames already emitted this state, so frame-synced effects draw
/// once per animation frame.
#[derive(Clone, Copy, Debug)]
pub struct EffectScratch {
    pub last_frame: Option<usize>,
}

impl Default for EffectScratch {
    fn default() -> Self {
        EffectScratch { last_frame: None }
    }
}

#[derive(Component)]
pub struct ActorController {
    pub machine: StateMachine<ActorState>,
    pub tuning: ActorTuning,

    /// Vertical velocity. +y is down, so jumps set this negative.
    pub velocity: f32,
    pub grounded: bool,
    /// Set while seated. Suppresses gravity without faking ground contact.
    pub gravity_suspended: bool,

    pub can_double_jump: bool,
    /// The jump button has been observed released since it was last consumed.
    pub jump_released: bool,
    /// A jump has been consumed in the current airborne cycle.
    pub jump_key_used: bool,
    pub jump_hold: f32,
    pub jump_held: bool,

    /// Residual lateral push from the last dash, signed. Zero when inactive.
    pub dash_momentum: f32,
    pub momentum_elapsed: f32,
    /// Signed lateral speed of the last dash tick, inherited by walk states.
    pub last_dash_speed: f32,

    /// Displacement accumulated this frame, consumed by the propagation
    /// pass that shifts transform children along with the knight.
    pub frame_delta: Vec2,

    pub walk: WalkScratch,
    pub dash: DashScratch,
    pub land: LandScratch,
    pub attack: AttackScratch,
    pub seat: SeatScratch,
    pub effect: EffectScratch,
}

impl ActorController {
    pub fn new(tuning: ActorTuning) -> Self {
        ActorController {
            machine: StateMachine::new(),
            tuning,
            velocity: 0.0,
            grounded: false,
            gravity_suspended: false,
            can_double_jump: false,
            jump_released: true,
            jump_key_used: false,
            jump_hold: 0.0,
            jump_held: false,
            dash_momentum: 0.0,
            momentum_elapsed: 0.0,
            last_dash_speed: 0.0,
            frame_delta: Vec2::ZERO,
            walk: WalkScratch::default(),
            dash: DashScratch::default(),
            land: LandScratch::default(),
            attack: AttackScratch::default(),
            seat: SeatScratch::default(),
            effect: EffectScratch::default(),
        }
    }

    pub fn state(&self) -> Option<ActorState> {
        self.machine.current()
    }

    /// Lateral distance contributed by dash momentum this tick. Decays
    /// linearly from `dash_momentum` to zero over `momentum_window`.
    pub fn momentum_step(&self) -> f32 {
        let factor = (1.0 - self.momentum_elapsed / self.tuning.momentum_window).max(0.0);
        self.dash_momentum * factor
    }
}

impl Default for ActorController {
    fn default() -> Self {
        ActorController::new(ActorTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_keys_follow_state_names() {
        assert_eq!(ActorState::Idle.animation_key(), "Idle");
        assert_eq!(ActorState::JumpStart.animation_key(), "Jump");
        assert_eq!(ActorState::JumpLoop.animation_key(), "JumpLoop");
        assert_eq!(ActorState::JumpAttackTop.animation_key(), "JumpAttackTop");
        assert_eq!(ActorState::Sit.animation_key(), "Sit");
    }

    #[test]
    fn test_air_attack_classification() {
        assert!(ActorState::JumpAttack.is_air_attack());
        assert!(ActorState::JumpAttackBottom.is_air_attack());
        assert!(!ActorState::Attack.is_air_attack());
        assert!(!ActorState::JumpLoop.is_air_attack());
    }

    #[test]
    fn test_momentum_step_decays_linearly_to_zero() {
        let mut actor = ActorController::default();
        actor.dash_momentum = 15.0;
        assert_eq!(actor.momentum_step(), 15.0);
        actor.momentum_elapsed = 0.1;
        assert!((actor.momentum_step() - 7.5).abs() < 1e-4);
        actor.momentum_elapsed = 0.3;
        assert_eq!(actor.momentum_step(), 0.0);
    }

    #[test]
    fn test_new_controller_is_idle_and_airborne_flags_clear() {
        let actor = ActorController::default();
        assert_eq!(actor.state(), None);
        assert!(!actor.grounded);
        assert!(actor.jump_released);
        assert!(!actor.can_double_jump);
        assert_eq!(actor.velocity, 0.0);
    }
}
