//! Contact detection and enter/stay/exit derivation.
//!
//! Once per frame, after the fixed-step passes, [`collision_step`] tests
//! every pair of enabled colliders on active entities and diffs the result
//! against the [`ContactTracker`]: pairs seen for the first time enter,
//! pairs seen again stay, tracked pairs no longer seen exit. Each pair
//! routes to [`TriggerEvent`] or [`CollisionEvent`] by the trigger flag
//! captured when it entered.
//!
//! Exits are emitted before enters so an actor handing off between two
//! surfaces in one frame settles grounded, not airborne.
//!
//! Colliders that vanish mid-frame (despawn, disable, deactivate) simply
//! stop appearing in the overlap set, so their pairs exit through the same
//! diff; [`purge_entity_contacts`] exists for the destroy path that must
//! fire those exits immediately instead of waiting for the next pass.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::collider::Collider;
use crate::components::lifecycle::Lifecycle;
use crate::components::mapposition::MapPosition;
use crate::events::collision::{CollisionEvent, ContactKind, TriggerEvent};
use crate::resources::contacts::{ContactPair, ContactTracker};

/// Pairwise overlap pass. Runs in the contacts schedule.
pub fn collision_step(
    colliders: Query<(Entity, &Collider, &MapPosition, &Lifecycle)>,
    mut tracker: ResMut<ContactTracker>,
    mut commands: Commands,
) {
    let mut bodies: Vec<(Entity, &Collider, Vec2)> = Vec::new();
    for (entity, collider, pos, lifecycle) in colliders.iter() {
        if !lifecycle.active || !collider.enabled {
            continue;
        }
        bodies.push((entity, collider, pos.pos));
    }

    let mut current: FxHashMap<ContactPair, bool> = FxHashMap::default();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (ea, ca, pa) = bodies[i];
            let (eb, cb, pb) = bodies[j];
            if ca.overlaps(pa, cb, pb) {
                current.insert(ContactPair::new(ea, eb), ca.is_trigger || cb.is_trigger);
            }
        }
    }

    let exited: Vec<(ContactPair, bool)> = tracker
        .iter()
        .filter(|(pair, _)| !current.contains_key(pair))
        .map(|(pair, trig)| (*pair, trig))
        .collect();
    for (pair, trig) in exited {
        tracker.remove(&pair);
        emit(&mut commands, pair, trig, ContactKind::Exit);
    }

    for (pair, trig_now) in current {
        if tracker.insert(pair, trig_now) {
            emit(&mut commands, pair, trig_now, ContactKind::Enter);
        } else {
            let trig = tracker.trigger_flag(&pair).unwrap_or(trig_now);
            emit(&mut commands, pair, trig, ContactKind::Stay);
        }
    }
}

/// Fire exit events for every active pair touching `entity` and drop them
/// from the tracker. Called before the entity is despawned so observers
/// still see both participants alive.
pub fn purge_entity_contacts(world: &mut World, entity: Entity) {
    let pairs = {
        let tracker = world.resource::<ContactTracker>();
        tracker.pairs_involving(entity)
    };
    for pair in pairs {
        let trig = {
            let mut tracker = world.resource_mut::<ContactTracker>();
            tracker.remove(&pair)
        };
        let Some(trig) = trig else {
            continue;
        };
        if trig {
            world.trigger(TriggerEvent {
                a: pair.a(),
                b: pair.b(),
                kind: ContactKind::Exit,
            });
        } else {
            world.trigger(CollisionEvent {
                a: pair.a(),
                b: pair.b(),
                kind: ContactKind::Exit,
            });
        }
    }
}

fn emit(commands: &mut Commands, pair: ContactPair, trigger: bool, kind: ContactKind) {
    if trigger {
        commands.trigger(TriggerEvent {
            a: pair.a(),
            b: pair.b(),
            kind,
        });
    } else {
        commands.trigger(CollisionEvent {
            a: pair.a(),
            b: pair.b(),
            kind,
        });
    }
}
