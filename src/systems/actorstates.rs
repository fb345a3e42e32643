//! Per-state update functions for the knight.
//!
//! Each function runs once per frame while its state is active, after the
//! shared integration in [`crate::systems::actor`]. A function returns as
//! soon as it has changed state; the new state gets its first update on the
//! next frame.
//!
//! Ground states poll input in priority order: attacks, then jump, then
//! dash, then the animation-completion transition, then movement. Airborne
//! states resolve the jump button (hold and double jump) and their
//! completion transition first, then attacks, then dash.

use glam::Vec2;

use crate::components::actor::ActorState;
use crate::systems::actor::{change_state, ActorCtx};

/// Dispatch to the active state's update function.
pub fn update_state(ctx: &mut ActorCtx, state: ActorState) {
    match state {
        ActorState::Idle => idle(ctx),
        ActorState::WalkStart => walk_start(ctx),
        ActorState::WalkLoop => walk_loop(ctx),
        ActorState::JumpStart => jump_start(ctx),
        ActorState::JumpLoop => jump_loop(ctx),
        ActorState::JumpLand => jump_land(ctx),
        ActorState::DoubleJump => double_jump(ctx),
        ActorState::Dash => dash(ctx, false),
        ActorState::JumpDash => dash(ctx, true),
        ActorState::Attack => attack(ctx, &ATTACK),
        ActorState::AttackTwice => attack(ctx, &ATTACK_TWICE),
        ActorState::AttackTop => attack(ctx, &ATTACK_TOP),
        ActorState::AttackBottom => attack(ctx, &ATTACK_BOTTOM),
        ActorState::JumpAttack => attack(ctx, &JUMP_ATTACK),
        ActorState::JumpAttackTwice => attack(ctx, &JUMP_ATTACK_TWICE),
        ActorState::JumpAttackTop => attack(ctx, &JUMP_ATTACK_TOP),
        ActorState::JumpAttackBottom => attack(ctx, &JUMP_ATTACK_BOTTOM),
        ActorState::Sit => sit(ctx),
    }
}

fn idle(ctx: &mut ActorCtx) {
    if ctx.actor.grounded {
        ctx.actor.jump_key_used = false;
    }
    if attack_inputs(ctx, false) {
        return;
    }
    if ctx.input.left.active || ctx.input.right.active {
        change_state(ctx, ActorState::WalkStart);
    } else if ctx.input.jump.active {
        change_state(ctx, ActorState::JumpStart);
    } else if ctx.input.dash.active {
        change_state(ctx, ActorState::Dash);
    }
}

fn walk_start(ctx: &mut ActorCtx) {
    if attack_inputs(ctx, false) {
        return;
    }
    if ctx.input.jump.active {
        change_state(ctx, ActorState::JumpStart);
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::Dash);
        return;
    }
    if ctx.animator.is_finished() {
        change_state(ctx, ActorState::WalkLoop);
        return;
    }
    walk_move(ctx);
}

fn walk_loop(ctx: &mut ActorCtx) {
    if attack_inputs(ctx, false) {
        return;
    }
    if ctx.input.jump.active {
        change_state(ctx, ActorState::JumpStart);
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::Dash);
        return;
    }
    let facing = ctx.animator.flip_x;
    walk_move(ctx);
    // A direction reversal replays the step-off animation.
    if ctx.actor.machine.is(ActorState::WalkLoop) && ctx.animator.flip_x != facing {
        change_state(ctx, ActorState::WalkStart);
    }
}

fn jump_start(ctx: &mut ActorCtx) {
    if jump_hold_and_double(ctx, 1.0) {
        return;
    }
    if ctx.animator.is_finished() {
        change_state(ctx, ActorState::JumpLoop);
        return;
    }
    if attack_inputs(ctx, true) {
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::JumpDash);
        return;
    }
    air_strafe(ctx);
}

fn jump_loop(ctx: &mut ActorCtx) {
    if jump_hold_and_double(ctx, 1.0) {
        return;
    }
    if attack_inputs(ctx, true) {
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::JumpDash);
        return;
    }
    air_strafe(ctx);
}

fn double_jump(ctx: &mut ActorCtx) {
    let hold_scale = ctx.actor.tuning.double_jump_hold_scale;
    if jump_hold_and_double(ctx, hold_scale) {
        return;
    }

    // Flourish ring, synced to the body animation, one draw per new frame.
    let frame = ctx.animator.current_frame();
    if frame < ctx.frame_count("DoubleJumpEffect") && ctx.actor.effect.last_frame != Some(frame) {
        let at = ctx.pos.pos;
        ctx.draw_effect("DoubleJumpEffect", frame, at, 0.7, 1.0);
        ctx.actor.effect.last_frame = Some(frame);
    }

    if ctx.animator.is_finished() {
        change_state(ctx, ActorState::JumpLoop);
        return;
    }
    if attack_inputs(ctx, true) {
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::JumpDash);
        return;
    }
    air_strafe(ctx);
}

fn jump_land(ctx: &mut ActorCtx) {
    let tun = ctx.actor.tuning;
    ctx.actor.land.elapsed += ctx.dt;

    // A short buffer swallows bounce re-jumps; after it, a held button
    // relaunches without waiting for the animation.
    if ctx.actor.land.elapsed >= tun.land_buffer && ctx.input.jump.active {
        change_state(ctx, ActorState::JumpStart);
        return;
    }
    if ctx.animator.is_finished() {
        if ctx.input.jump.active {
            change_state(ctx, ActorState::JumpStart);
        } else if ctx.input.left.active || ctx.input.right.active {
            change_state(ctx, ActorState::WalkStart);
        } else {
            change_state(ctx, ActorState::Idle);
        }
        return;
    }
    if ctx.input.dash.active {
        change_state(ctx, ActorState::Dash);
        return;
    }
    air_strafe(ctx);
}

fn dash(ctx: &mut ActorCtx, air: bool) {
    let tun = ctx.actor.tuning;

    if ctx.actor.dash.progress < tun.dash_ticks {
        ctx.pos.pos.x += tun.dash_speed * ctx.actor.dash.direction;
        draw_dash_trail(ctx);
        ctx.actor.dash.progress += 1;
    }

    // In the last two ticks a held direction pre-faces the follow-up.
    if ctx.actor.dash.progress + 2 >= tun.dash_ticks
        && !ctx.animator.is_finished()
        && (ctx.input.left.active || ctx.input.right.active)
    {
        ctx.animator.flip_x = ctx.input.right.active;
    }

    if ctx.animator.is_finished() {
        if air {
            change_state(ctx, ActorState::JumpLoop);
        } else if ctx.input.left.active || ctx.input.right.active {
            change_state(ctx, ActorState::WalkLoop);
        } else {
            change_state(ctx, ActorState::Idle);
        }
    }
}

/// Three after-images trail the dash, spaced 20px behind the knight,
/// fading and shrunk.
fn draw_dash_trail(ctx: &mut ActorCtx) {
    let frame = ctx.animator.current_frame();
    if frame >= ctx.frame_count("DashEffect") {
        return;
    }
    let base = ctx.pos.pos;
    let dir = ctx.actor.dash.direction;
    for i in 1..=3u32 {
        let alpha = 1.0 / (i as f32 + 1.0);
        let at = Vec2::new(base.x - dir * i as f32 * 20.0, base.y);
        ctx.draw_effect("DashEffect", frame, at, 0.6, alpha);
    }
}

/// Swing parameters shared by the generic attack update.
struct AttackSpec {
    /// Effect sheet drawn on the hit frame.
    effect: &'static str,
    /// Effect offset from the knight, x is mirrored by facing.
    offset: Vec2,
    /// Combo follow-up, if this swing has one.
    chain: Option<ActorState>,
    /// Airborne variant: always falls out into `JumpLoop`.
    air: bool,
}

const ATTACK: AttackSpec = AttackSpec {
    effect: "AttackEffect",
    offset: Vec2::new(70.0, 0.0),
    chain: Some(ActorState::AttackTwice),
    air: false,
};
const ATTACK_TWICE: AttackSpec = AttackSpec {
    effect: "AttackTwiceEffect",
    offset: Vec2::new(70.0, 0.0),
    chain: None,
    air: false,
};
const ATTACK_TOP: AttackSpec = AttackSpec {
    effect: "AttackTopEffect",
    offset: Vec2::new(10.0, -50.0),
    chain: None,
    air: false,
};
const ATTACK_BOTTOM: AttackSpec = AttackSpec {
    effect: "AttackBottomEffect",
    offset: Vec2::new(10.0, 80.0),
    chain: None,
    air: false,
};
const JUMP_ATTACK: AttackSpec = AttackSpec {
    effect: "AttackEffect",
    offset: Vec2::new(70.0, 0.0),
    chain: Some(ActorState::JumpAttackTwice),
    air: true,
};
const JUMP_ATTACK_TWICE: AttackSpec = AttackSpec {
    effect: "AttackTwiceEffect",
    offset: Vec2::new(70.0, 0.0),
    chain: None,
    air: true,
};
const JUMP_ATTACK_TOP: AttackSpec = AttackSpec {
    effect: "AttackTopEffect",
    offset: Vec2::new(10.0, -50.0),
    chain: None,
    air: true,
};
const JUMP_ATTACK_BOTTOM: AttackSpec = AttackSpec {
    effect: "AttackBottomEffect",
    offset: Vec2::new(10.0, 80.0),
    chain: None,
    air: true,
};

fn attack(ctx: &mut ActorCtx, spec: &AttackSpec) {
    let tun = ctx.actor.tuning;

    if ctx.actor.attack.combo_open {
        ctx.actor.attack.combo_elapsed += ctx.dt;
        if let Some(next) = spec.chain {
            if ctx.actor.attack.released && ctx.input.attack.active {
                change_state(ctx, next);
                return;
            }
        }
        if ctx.actor.attack.combo_elapsed >= tun.combo_window {
            ctx.actor.attack.combo_open = false;
        }
    }
    if !ctx.input.attack.active {
        ctx.actor.attack.released = true;
    }

    // The hit lands at the midpoint frame of the swing.
    let total = match ctx.animator.current.as_deref() {
        Some(key) => ctx.frame_count(key),
        None => 0,
    };
    if !ctx.actor.attack.hit_done && total > 0 && ctx.animator.current_frame() >= total / 2 {
        ctx.actor.attack.hit_done = true;
        ctx.play_sound("sword");
        if spec.chain.is_some() {
            ctx.actor.attack.combo_open = true;
            ctx.actor.attack.combo_elapsed = 0.0;
        }
        let at = ctx.pos.pos + Vec2::new(spec.offset.x * ctx.facing(), spec.offset.y);
        ctx.draw_effect(spec.effect, 0, at, 1.0, 1.0);
    }

    if ctx.animator.is_finished() {
        if ctx.actor.attack.was_grounded && !spec.air {
            if ctx.input.left.active || ctx.input.right.active {
                change_state(ctx, ActorState::WalkLoop);
            } else {
                change_state(ctx, ActorState::Idle);
            }
        } else {
            change_state(ctx, ActorState::JumpLoop);
        }
        return;
    }

    // Limited strafing keeps the swing mobile.
    air_strafe(ctx);
}

fn sit(ctx: &mut ActorCtx) {
    ctx.actor.velocity = 0.0;
    // Stay glued to the seat even if the bench moves under the knight.
    let Some(anchor) = ctx.seat_anchor else {
        return;
    };
    let drift = ctx.pos.pos - anchor;
    if drift.x.abs() > 1.0 || drift.y.abs() > 1.0 {
        ctx.pos.pos = anchor;
    }
}

/// Shared jump-button handling: hold extends the rise while the window is
/// open, and a full release-then-press mid-air spends the double jump.
/// Returns `true` when a transition happened.
fn jump_hold_and_double(ctx: &mut ActorCtx, hold_scale: f32) -> bool {
    let tun = ctx.actor.tuning;

    if ctx.input.jump.active && ctx.actor.jump_held {
        ctx.actor.jump_hold += ctx.dt;
        if ctx.actor.jump_hold <= tun.jump_hold_max {
            ctx.actor.velocity -= tun.jump_extra_force * hold_scale;
        }
    } else {
        ctx.actor.jump_held = false;
    }
    if !ctx.input.jump.active {
        ctx.actor.jump_released = true;
        ctx.actor.jump_held = false;
    }

    if ctx.input.jump.active
        && ctx.actor.can_double_jump
        && ctx.actor.jump_released
        && ctx.actor.jump_key_used
    {
        ctx.actor.can_double_jump = false;
        ctx.actor.jump_released = false;
        ctx.actor.jump_key_used = true;
        change_state(ctx, ActorState::DoubleJump);
        return true;
    }
    false
}

/// Direction-gated attack entry. The up/down modifier picks the variant;
/// the attack button itself is what commits. Returns `true` on transition.
fn attack_inputs(ctx: &mut ActorCtx, air: bool) -> bool {
    let (side, top, bottom) = if air {
        (
            ActorState::JumpAttack,
            ActorState::JumpAttackTop,
            ActorState::JumpAttackBottom,
        )
    } else {
        (
            ActorState::Attack,
            ActorState::AttackTop,
            ActorState::AttackBottom,
        )
    };
    if ctx.input.attack_up.active {
        if ctx.input.attack.active {
            change_state(ctx, top);
            return true;
        }
    } else if ctx.input.attack_down.active {
        if ctx.input.attack.active {
            change_state(ctx, bottom);
            return true;
        }
    } else if ctx.input.attack.active {
        change_state(ctx, side);
        return true;
    }
    false
}

/// Ground walk with the dash-seeded speed decay. No movement key drops to
/// `Idle`.
fn walk_move(ctx: &mut ActorCtx) {
    let tun = ctx.actor.tuning;
    let speed = if ctx.actor.walk.from_dash {
        ctx.actor.walk.decay_elapsed += ctx.dt;
        let decay = (1.0 - ctx.actor.walk.decay_elapsed / tun.walk_decay_window).max(0.0);
        tun.walk_speed + (ctx.actor.walk.seed_speed - tun.walk_speed) * decay
    } else {
        tun.walk_speed
    };
    if ctx.input.left.active {
        ctx.pos.pos.x -= speed;
        ctx.animator.flip_x = false;
    } else if ctx.input.right.active {
        ctx.pos.pos.x += speed;
        ctx.animator.flip_x = true;
    } else {
        change_state(ctx, ActorState::Idle);
    }
}

/// Plain lateral steering at walk speed, no idle fallback. Used airborne
/// and during swings.
fn air_strafe(ctx: &mut ActorCtx) {
    let speed = ctx.actor.tuning.walk_speed;
    if ctx.input.left.active {
        ctx.pos.pos.x -= speed;
        ctx.animator.flip_x = false;
    } else if ctx.input.right.active {
        ctx.pos.pos.x += speed;
        ctx.animator.flip_x = true;
    }
}
