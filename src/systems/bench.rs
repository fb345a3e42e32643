//! Bench interaction: sit down, stand up.
//!
//! Runs before the knight update each frame. Proximity is a radius check
//! around the bench origin; the interact edge toggles between seating the
//! knight on the anchor point and standing it up slightly raised so it does
//! not re-overlap the seat collider. A short cooldown debounces the toggle.

use bevy_ecs::message::MessageWriter;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::actor::{ActorController, ActorState, SeatScratch};
use crate::components::animator::Animator;
use crate::components::bench::BenchSeat;
use crate::components::lifecycle::Lifecycle;
use crate::components::mapposition::MapPosition;
use crate::events::audio::AudioCmd;
use crate::events::canvas::CanvasCmd;
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::SoundBank;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::actor::{change_state, ActorCtx};

#[allow(clippy::too_many_arguments)]
pub fn bench_interaction(
    mut benches: Query<(Entity, &mut BenchSeat, &MapPosition, &Lifecycle), Without<ActorController>>,
    mut actors: Query<(
        &mut ActorController,
        &mut Animator,
        &mut MapPosition,
        &Lifecycle,
    )>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
    mut canvas: MessageWriter<CanvasCmd>,
) {
    for (bench_entity, mut seat, bench_pos, bench_life) in benches.iter_mut() {
        if !bench_life.active {
            continue;
        }
        seat.cooldown_left = (seat.cooldown_left - time.delta).max(0.0);

        for (mut actor, mut animator, mut pos, life) in actors.iter_mut() {
            if !life.active || actor.machine.current().is_none() {
                continue;
            }

            let dist_sq = (pos.pos - bench_pos.pos).length_squared();
            let in_range = dist_sq <= seat.radius * seat.radius;
            if in_range != seat.in_range {
                debug!(
                    "knight {} bench {:?} range",
                    if in_range { "entered" } else { "left" },
                    bench_entity
                );
                seat.in_range = in_range;
            }
            if !in_range || !input.interact.just_pressed || seat.cooldown_left > 0.0 {
                continue;
            }
            seat.cooldown_left = seat.cooldown;

            let anchor = bench_pos.pos + seat.seat_offset;
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
                seat_anchor: Some(anchor),
            };

            if !seat.occupied {
                seat.occupied = true;
                ctx.pos.pos = anchor;
                ctx.actor.seat = SeatScratch {
                    bench: Some(bench_entity),
                    offset: seat.seat_offset,
                };
                change_state(&mut ctx, ActorState::Sit);
            } else {
                seat.occupied = false;
                ctx.pos.pos.y -= seat.stand_raise;
                change_state(&mut ctx, ActorState::Idle);
            }

            // Seat and stand-up teleports carry transform children too.
            let moved = pos.pos - before;
            if moved != Vec2::ZERO {
                actor.frame_delta += moved;
            }
        }
    }
}
