//! Contact event types and a logging observer.
//!
//! The collision pass diffs the overlapping pairs of the current frame
//! against the previous frame and emits one event per pair and phase:
//! [`ContactKind::Enter`] the frame a pair first overlaps,
//! [`ContactKind::Stay`] every subsequent overlapping frame and
//! [`ContactKind::Exit`] the frame the pair separates. Pairs where at
//! least one collider is a trigger come out as [`TriggerEvent`] instead of
//! [`CollisionEvent`]; a pair never produces both.
//!
//! Exit events also fire when a collider despawns or is disabled while the
//! pair was active, so observers never see a contact silently vanish.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

/// Phase of a tracked contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Enter,
    Stay,
    Exit,
}

/// Solid-vs-solid contact notification.
///
/// The two fields are the entity IDs of the participants. Both orderings
/// refer to the same tracked pair; no a/b ordering is guaranteed.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    pub kind: ContactKind,
}

/// Contact notification where at least one collider is a trigger.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerEvent {
    pub a: Entity,
    pub b: Entity,
    pub kind: ContactKind,
}

/// Global observer that logs contact transitions. Skips `Stay` to keep the
/// log readable; useful while tuning collider sizes.
pub fn observe_log_contacts(trigger: On<CollisionEvent>) {
    let ev = trigger.event();
    if ev.kind == ContactKind::Stay {
        return;
    }
    log::debug!("contact {:?}: {:?} <-> {:?}", ev.kind, ev.a, ev.b);
}
