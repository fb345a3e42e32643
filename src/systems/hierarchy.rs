//! Transform operations over parent-child entity hierarchies.
//!
//! Positions here are free-standing values kept rigid by *delta
//! propagation*: setting a node's position computes the change from its
//! prior value and applies that same change to every descendant, at any
//! depth. Rotation propagates the same way; scale propagates as a
//! component-wise ratio so nested scales compose multiplicatively.
//!
//! Reparenting rewrites the node's stored position to its offset from the
//! new parent, leaving the hierarchy's relative layout unchanged at the
//! moment of the call. No cycle check is performed; callers must not
//! introduce cycles.
//!
//! The query-parameter flavors are meant to be called from systems that
//! already hold the matching queries; [`set_parent`] needs structural
//! access and takes the whole [`World`].

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;
use smallvec::SmallVec;

use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;

/// Move `entity` to `new_pos`, shifting all descendants by the same delta.
pub fn set_position(
    entity: Entity,
    new_pos: Vec2,
    positions: &mut Query<&mut MapPosition>,
    children: &Query<&Children>,
) {
    let Ok(mut pos) = positions.get_mut(entity) else {
        return;
    };
    let delta = new_pos - pos.pos;
    pos.pos = new_pos;
    shift_descendants(entity, delta, positions, children);
}

/// Shift `entity` and all descendants by `delta`.
pub fn translate(
    entity: Entity,
    delta: Vec2,
    positions: &mut Query<&mut MapPosition>,
    children: &Query<&Children>,
) {
    let Ok(mut pos) = positions.get_mut(entity) else {
        return;
    };
    pos.pos += delta;
    shift_descendants(entity, delta, positions, children);
}

pub(crate) fn shift_descendants(
    entity: Entity,
    delta: Vec2,
    positions: &mut Query<&mut MapPosition>,
    children: &Query<&Children>,
) {
    let Ok(kids) = children.get(entity) else {
        return;
    };
    let kids: SmallVec<[Entity; 8]> = kids.iter().collect();
    for kid in kids {
        if let Ok(mut pos) = positions.get_mut(kid) {
            pos.pos += delta;
        }
        shift_descendants(kid, delta, positions, children);
    }
}

/// Rotate `entity` to `degrees`, turning all descendants by the same delta.
pub fn set_rotation(
    entity: Entity,
    degrees: f32,
    rotations: &mut Query<&mut Rotation>,
    children: &Query<&Children>,
) {
    let Ok(mut rot) = rotations.get_mut(entity) else {
        return;
    };
    let delta = degrees - rot.degrees;
    rot.degrees = degrees;
    turn_descendants(entity, delta, rotations, children);
}

fn turn_descendants(
    entity: Entity,
    delta: f32,
    rotations: &mut Query<&mut Rotation>,
    children: &Query<&Children>,
) {
    let Ok(kids) = children.get(entity) else {
        return;
    };
    let kids: SmallVec<[Entity; 8]> = kids.iter().collect();
    for kid in kids {
        if let Ok(mut rot) = rotations.get_mut(kid) {
            rot.degrees += delta;
        }
        turn_descendants(kid, delta, rotations, children);
    }
}

/// Rescale `entity` to `new_scale`, multiplying all descendants by the same
/// component-wise ratio. A zero component in the current scale cannot form
/// a ratio; descendants are left untouched in that case.
pub fn set_scale(
    entity: Entity,
    new_scale: Vec2,
    scales: &mut Query<&mut Scale>,
    children: &Query<&Children>,
) {
    let Ok(mut scale) = scales.get_mut(entity) else {
        return;
    };
    let old = scale.scale;
    scale.scale = new_scale;

    if old.x == 0.0 || old.y == 0.0 {
        warn!("set_scale: zero component in current scale, descendants not rescaled");
        return;
    }
    let ratio = new_scale / old;
    rescale_descendants(entity, ratio, scales, children);
}

fn rescale_descendants(
    entity: Entity,
    ratio: Vec2,
    scales: &mut Query<&mut Scale>,
    children: &Query<&Children>,
) {
    let Ok(kids) = children.get(entity) else {
        return;
    };
    let kids: SmallVec<[Entity; 8]> = kids.iter().collect();
    for kid in kids {
        if let Ok(mut scale) = scales.get_mut(kid) {
            scale.scale *= ratio;
        }
        rescale_descendants(kid, ratio, scales, children);
    }
}

/// Attach `child` under `parent`, rewriting the child's stored position to
/// its offset from the parent so the relative layout is unchanged.
pub fn set_parent(world: &mut World, child: Entity, parent: Entity) {
    let Some(parent_pos) = world.get::<MapPosition>(parent).map(|p| p.pos) else {
        warn!("set_parent: parent {:?} has no position", parent);
        return;
    };
    if let Some(mut pos) = world.get_mut::<MapPosition>(child) {
        pos.pos -= parent_pos;
    }
    world.entity_mut(child).insert(ChildOf(parent));
    world.flush();
}
