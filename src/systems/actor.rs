//! Knight controller integration: per-tick physics, state transitions and
//! the lifecycle observers that boot and ground the knight.
//!
//! Per-state behavior lives in [`crate::systems::actorstates`]; this module
//! owns everything the states share. [`actor_update`] runs each frame and,
//! per knight, applies dash momentum, gravity and the proactive ground scan
//! before dispatching to the active state's update function.
//!
//! Transitions always run exit hook, then the machine advance, then the
//! enter hook, so the previous state is visible to the enter hook through
//! [`StateMachine::previous`](crate::components::statemachine::StateMachine::previous).

use bevy_ecs::hierarchy::Children;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error};
use smallvec::SmallVec;

use crate::components::actor::{
    ActorController, ActorState, AttackScratch, DashScratch, EffectScratch, LandScratch,
    SeatScratch, WalkScratch,
};
use crate::components::animator::Animator;
use crate::components::collider::Collider;
use crate::components::lifecycle::Lifecycle;
use crate::components::mapposition::MapPosition;
use crate::events::audio::AudioCmd;
use crate::events::canvas::CanvasCmd;
use crate::events::collision::{CollisionEvent, ContactKind};
use crate::events::lifecycle::{AwakeEvent, StartEvent};
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::SoundBank;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::{actorstates, hierarchy};

/// Collider tag the knight treats as walkable ground.
pub const GROUND_TAG: &str = "Ground";

/// Everything a state hook or update function may touch, bundled so the
/// per-state functions stay plain `fn(&mut ActorCtx)`. The two writers
/// carry their own system-parameter lifetimes.
pub struct ActorCtx<'a, 'w, 'x> {
    pub actor: &'a mut ActorController,
    pub animator: &'a mut Animator,
    pub pos: &'a mut MapPosition,
    pub input: &'a InputState,
    /// Measured frame delta, for timers. Physical steps are per tick.
    pub dt: f32,
    pub store: &'a AnimationStore,
    pub bank: &'a SoundBank,
    pub audio: &'a mut MessageWriter<'w, AudioCmd>,
    pub canvas: &'a mut MessageWriter<'x, CanvasCmd>,
    /// World-space seat anchor resolved for this tick, while seated.
    pub seat_anchor: Option<Vec2>,
}

impl ActorCtx<'_, '_, '_> {
    /// Resolve a bank name (single or group) and queue it for playback.
    pub fn play_sound(&mut self, name: &str) {
        if let Some(id) = self.bank.resolve(name) {
            self.audio.write(AudioCmd::PlayFx { id });
        }
    }

    pub fn stop_sounds(&mut self) {
        self.audio.write(AudioCmd::StopAllFx);
    }

    /// Signed facing: `+1.0` right, `-1.0` left.
    pub fn facing(&self) -> f32 {
        if self.animator.flip_x { 1.0 } else { -1.0 }
    }

    /// Frame count of a store entry; 0 for unknown keys.
    pub fn frame_count(&self, key: &str) -> usize {
        self.store.get(key).map(|a| a.frame_count).unwrap_or(0)
    }

    /// Queue one effect draw at a world position. The command carries
    /// mirroring for a left-facing knight.
    pub fn draw_effect(&mut self, key: &str, frame: usize, pos: Vec2, scale: f32, alpha: f32) {
        self.canvas.write(CanvasCmd::DrawEffect {
            key: key.to_string(),
            frame,
            pos,
            flip_x: !self.animator.flip_x,
            scale,
            alpha,
        });
    }
}

/// Put the machine in its first state and run the enter hook. No exit hook
/// runs and the previous slot stays empty.
pub fn init_state(ctx: &mut ActorCtx, state: ActorState) {
    ctx.actor.machine.init(state);
    enter_state(ctx, state);
}

/// Regular transition: exit the current state, advance, enter the next.
pub fn change_state(ctx: &mut ActorCtx, next: ActorState) {
    match ctx.actor.machine.current() {
        Some(current) => {
            debug!("knight {:?} -> {:?}", current, next);
            exit_state(ctx, current);
            ctx.actor.machine.advance(next);
        }
        None => ctx.actor.machine.init(next),
    }
    enter_state(ctx, next);
}

fn enter_state(ctx: &mut ActorCtx, state: ActorState) {
    ctx.animator.change_animation(state.animation_key(), ctx.store);
    let tun = ctx.actor.tuning;
    match state {
        ActorState::Idle => {
            ctx.stop_sounds();
        }
        ActorState::WalkStart => {
            ctx.play_sound("run");
            let from_dash = matches!(ctx.actor.machine.previous(), Some(s) if s.is_dash());
            ctx.actor.walk = WalkScratch {
                from_dash,
                seed_speed: if from_dash {
                    ctx.actor.last_dash_speed.abs() * 0.5
                } else {
                    tun.walk_speed
                },
                decay_elapsed: 0.0,
            };
        }
        ActorState::WalkLoop => {
            ctx.play_sound("run");
            // Arriving from WalkStart keeps the decay scratch mid-flight.
            if ctx.actor.machine.previous() != Some(ActorState::WalkStart) {
                ctx.actor.walk = WalkScratch {
                    from_dash: false,
                    seed_speed: tun.walk_speed,
                    decay_elapsed: 0.0,
                };
            }
        }
        ActorState::JumpStart => {
            ctx.play_sound("jump");
            ctx.actor.grounded = false;
            ctx.actor.velocity = -tun.jump_force;
            ctx.actor.jump_hold = 0.0;
            ctx.actor.jump_held = true;
            ctx.actor.can_double_jump = true;
            ctx.actor.jump_key_used = true;
            ctx.actor.jump_released = false;
        }
        ActorState::JumpLoop => {
            ctx.play_sound("falling");
        }
        ActorState::JumpLand => {
            ctx.stop_sounds();
            ctx.play_sound("land");
            ctx.actor.land = LandScratch { elapsed: 0.0 };
            ctx.actor.can_double_jump = false;
            ctx.actor.jump_released = true;
            ctx.actor.jump_key_used = false;
        }
        ActorState::DoubleJump => {
            ctx.play_sound("doublejump");
            ctx.actor.grounded = false;
            ctx.actor.velocity = -tun.jump_force * tun.double_jump_scale;
            ctx.actor.jump_hold = 0.0;
            ctx.actor.jump_held = true;
            ctx.actor.can_double_jump = false;
            ctx.actor.effect = EffectScratch::default();
        }
        ActorState::Dash | ActorState::JumpDash => {
            ctx.play_sound("dash");
            ctx.actor.dash = DashScratch {
                direction: ctx.facing(),
                progress: 0,
            };
        }
        ActorState::Attack
        | ActorState::AttackTop
        | ActorState::AttackBottom
        | ActorState::JumpAttack
        | ActorState::JumpAttackTop
        | ActorState::JumpAttackBottom => {
            // The live flag can already be stale when the swing starts from
            // a walk state on the very tick the knight steps off a ledge.
            let was_grounded = ctx.actor.grounded
                || matches!(
                    ctx.actor.machine.previous(),
                    Some(ActorState::Idle | ActorState::WalkStart | ActorState::WalkLoop)
                );
            ctx.actor.attack = AttackScratch {
                hit_done: false,
                was_grounded,
                combo_open: false,
                combo_elapsed: 0.0,
                released: !ctx.input.attack.active,
            };
        }
        ActorState::AttackTwice | ActorState::JumpAttackTwice => {
            // A chained second hit inherits the grounded flag captured by
            // the first one.
            let chained = matches!(
                ctx.actor.machine.previous(),
                Some(ActorState::Attack | ActorState::JumpAttack)
            );
            let was_grounded = if chained {
                ctx.actor.attack.was_grounded
            } else {
                ctx.actor.grounded
            };
            ctx.actor.attack = AttackScratch {
                hit_done: false,
                was_grounded,
                combo_open: false,
                combo_elapsed: 0.0,
                released: !ctx.input.attack.active,
            };
        }
        ActorState::Sit => {
            ctx.actor.velocity = 0.0;
            ctx.actor.grounded = true;
            ctx.actor.gravity_suspended = true;
            ctx.actor.dash_momentum = 0.0;
            ctx.actor.momentum_elapsed = 0.0;
        }
    }
}

fn exit_state(ctx: &mut ActorCtx, state: ActorState) {
    let tun = ctx.actor.tuning;
    match state {
        ActorState::WalkStart
        | ActorState::JumpLoop
        | ActorState::Attack
        | ActorState::AttackTwice
        | ActorState::AttackTop
        | ActorState::AttackBottom => {
            ctx.stop_sounds();
        }
        ActorState::Dash | ActorState::JumpDash => {
            let dir = ctx.actor.dash.direction;
            ctx.actor.dash_momentum = tun.dash_momentum * dir;
            ctx.actor.momentum_elapsed = 0.0;
            ctx.actor.last_dash_speed = tun.dash_speed * dir;
        }
        ActorState::Sit => {
            ctx.actor.gravity_suspended = false;
            ctx.actor.seat = SeatScratch::default();
        }
        _ => {}
    }
}

/// Per-frame knight driver. Integrates shared motion, then dispatches to
/// the active state.
#[allow(clippy::too_many_arguments)]
pub fn actor_update(
    mut actors: Query<(
        &mut ActorController,
        &mut Animator,
        &mut MapPosition,
        &Collider,
        &Lifecycle,
    )>,
    surfaces: Query<(Entity, &Collider, &MapPosition, &Lifecycle), Without<ActorController>>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
    mut canvas: MessageWriter<CanvasCmd>,
) {
    let grounds: SmallVec<[(&Collider, Vec2); 4]> = surfaces
        .iter()
        .filter(|(_, c, _, l)| l.active && c.enabled && c.tag == GROUND_TAG)
        .map(|(_, c, p, _)| (c, p.pos))
        .collect();

    for (mut actor, mut animator, mut pos, collider, lifecycle) in actors.iter_mut() {
        if !lifecycle.active || actor.machine.current().is_none() {
            continue;
        }

        let seat_anchor = actor.seat.bench.and_then(|bench| {
            surfaces
                .get(bench)
                .ok()
                .map(|(_, _, p, _)| p.pos + actor.seat.offset)
        });

        let before = pos.pos;
        let mut ctx = ActorCtx {
            actor: &mut actor,
            animator: &mut animator,
            pos: &mut pos,
            input: &input,
            dt: time.delta,
            store: &store,
            bank: &bank,
            audio: &mut audio,
            canvas: &mut canvas,
            seat_anchor,
        };

        integrate(&mut ctx, collider, &grounds);

        if let Some(state) = ctx.actor.machine.current() {
            actorstates::update_state(&mut ctx, state);
        }

        let moved = pos.pos - before;
        if moved != Vec2::ZERO {
            actor.frame_delta += moved;
        }
    }
}

/// Shift each knight's transform children by the displacement it
/// accumulated this frame, so parented entities stay rigid with it. Runs
/// after [`actor_update`]; every path that moves the knight records its
/// delta on [`ActorController::frame_delta`].
pub fn propagate_actor_motion(
    mut actors: Query<(Entity, &mut ActorController)>,
    mut positions: Query<&mut MapPosition>,
    children: Query<&Children>,
) {
    for (entity, mut actor) in actors.iter_mut() {
        let delta = actor.frame_delta;
        if delta == Vec2::ZERO {
            continue;
        }
        actor.frame_delta = Vec2::ZERO;
        hierarchy::shift_descendants(entity, delta, &mut positions, &children);
    }
}

/// Shared motion, in order: dash momentum, gravity, ground scan.
fn integrate(ctx: &mut ActorCtx, collider: &Collider, grounds: &[(&Collider, Vec2)]) {
    let tun = ctx.actor.tuning;

    if ctx.actor.dash_momentum != 0.0 {
        ctx.actor.momentum_elapsed += ctx.dt;
        ctx.pos.pos.x += ctx.actor.momentum_step();
        if ctx.actor.momentum_elapsed >= tun.momentum_window {
            ctx.actor.dash_momentum = 0.0;
            ctx.actor.momentum_elapsed = 0.0;
        }
    }

    if !ctx.actor.grounded && !ctx.actor.gravity_suspended {
        ctx.actor.velocity += tun.gravity;
        ctx.pos.pos.y += ctx.actor.velocity;
    }

    let hit = grounds
        .iter()
        .find(|(g, gpos)| collider.overlaps(ctx.pos.pos, g, *gpos));
    match hit {
        Some((ground, ground_pos)) if ctx.actor.velocity >= 0.0 => {
            ctx.actor.grounded = true;
            ctx.actor.velocity = 0.0;
            ctx.pos.pos.y = collider.resting_y(ground.top(*ground_pos));
            if matches!(
                ctx.actor.machine.current(),
                Some(ActorState::JumpStart | ActorState::JumpLoop)
            ) {
                change_state(ctx, ActorState::JumpLand);
            }
        }
        // Rising through a platform: pass freely, flags untouched.
        Some(_) => {}
        None => ctx.actor.grounded = false,
    }
}

/// Grounding also reacts to contact transitions from the collision pass, so
/// a ground slab that stops overlapping (moving platform, destroyed floor)
/// drops the knight even while its own position is unchanged.
pub fn observe_ground_contacts(
    trigger: On<CollisionEvent>,
    mut actors: Query<(&mut ActorController, &Collider, &mut MapPosition)>,
    surfaces: Query<(&Collider, &MapPosition), Without<ActorController>>,
) {
    let ev = *trigger.event();
    let (actor_entity, other) = if actors.contains(ev.a) {
        (ev.a, ev.b)
    } else if actors.contains(ev.b) {
        (ev.b, ev.a)
    } else {
        return;
    };
    let Ok((mut actor, collider, mut pos)) = actors.get_mut(actor_entity) else {
        return;
    };

    match ev.kind {
        ContactKind::Exit => {
            // The surface may already be despawned; then it cannot be
            // identified as ground and the flag is left to the scan.
            if surfaces.get(other).is_ok_and(|(c, _)| c.tag == GROUND_TAG) {
                actor.grounded = false;
            }
        }
        ContactKind::Enter | ContactKind::Stay => {
            let Ok((surface, surface_pos)) = surfaces.get(other) else {
                return;
            };
            if surface.tag == GROUND_TAG && actor.velocity >= 0.0 {
                actor.grounded = true;
                actor.velocity = 0.0;
                let resting = collider.resting_y(surface.top(surface_pos.pos));
                actor.frame_delta.y += resting - pos.pos.y;
                pos.pos.y = resting;
            }
        }
    }
}

/// Boot the knight into `Idle` when its start fires.
#[allow(clippy::too_many_arguments)]
pub fn observe_actor_start(
    trigger: On<StartEvent>,
    mut actors: Query<(&mut ActorController, &mut Animator, &mut MapPosition)>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
    mut canvas: MessageWriter<CanvasCmd>,
) {
    let entity = trigger.event().entity;
    let Ok((mut actor, mut animator, mut pos)) = actors.get_mut(entity) else {
        return;
    };
    let mut ctx = ActorCtx {
        actor: &mut actor,
        animator: &mut animator,
        pos: &mut pos,
        input: &input,
        dt: time.delta,
        store: &store,
        bank: &bank,
        audio: &mut audio,
        canvas: &mut canvas,
        seat_anchor: None,
    };
    init_state(&mut ctx, ActorState::Idle);
}

/// Sanity-check the knight's component set once, at awake.
pub fn observe_actor_awake(
    trigger: On<AwakeEvent>,
    actors: Query<(), With<ActorController>>,
    animators: Query<(), With<Animator>>,
    colliders: Query<(), With<Collider>>,
) {
    let entity = trigger.event().entity;
    if actors.get(entity).is_err() {
        return;
    }
    if animators.get(entity).is_err() {
        error!("knight {:?} is missing an Animator", entity);
    }
    if colliders.get(entity).is_err() {
        error!("knight {:?} is missing a Collider", entity);
    }
}
