//! Integration tests for transform propagation across entity hierarchies.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec2;

use hollowrun::components::mapposition::MapPosition;
use hollowrun::components::rotation::Rotation;
use hollowrun::components::scale::Scale;
use hollowrun::systems::hierarchy::{
    set_parent, set_position, set_rotation, set_scale, translate,
};

const EPSILON: f32 = 1e-5;

fn approx_vec(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPSILON
}

fn pos_of(world: &World, entity: Entity) -> Vec2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

/// Three-level chain: root -> mid -> leaf.
fn spawn_chain(world: &mut World) -> (Entity, Entity, Entity) {
    let root = world
        .spawn((MapPosition::new(100.0, 100.0), Rotation::new(0.0)))
        .id();
    let mid = world
        .spawn((MapPosition::new(130.0, 100.0), Rotation::new(10.0)))
        .id();
    let leaf = world
        .spawn((MapPosition::new(130.0, 140.0), Rotation::new(20.0)))
        .id();
    set_parent(world, mid, root);
    set_parent(world, leaf, mid);
    (root, mid, leaf)
}

#[test]
fn test_set_parent_rewrites_child_to_offset() {
    let mut world = World::new();
    let parent = world.spawn(MapPosition::new(10.0, 10.0)).id();
    let child = world.spawn(MapPosition::new(15.0, 25.0)).id();

    set_parent(&mut world, child, parent);

    assert!(approx_vec(pos_of(&world, child), Vec2::new(5.0, 15.0)));
    // Parenting is structural: the parent's Children now lists the child.
    let children = world.get::<Children>(parent).unwrap();
    assert!(children.iter().any(|e| e == child));
}

#[test]
fn test_translate_shifts_descendants_at_depth() {
    let mut world = World::new();
    let (root, mid, leaf) = spawn_chain(&mut world);
    let mid_before = pos_of(&world, mid);
    let leaf_before = pos_of(&world, leaf);

    let mut state =
        SystemState::<(Query<&mut MapPosition>, Query<&Children>)>::new(&mut world);
    {
        let (mut positions, children) = state.get_mut(&mut world);
        translate(root, Vec2::new(7.0, -3.0), &mut positions, &children);
    }

    assert!(approx_vec(pos_of(&world, root), Vec2::new(107.0, 97.0)));
    assert!(approx_vec(pos_of(&world, mid), mid_before + Vec2::new(7.0, -3.0)));
    assert!(approx_vec(
        pos_of(&world, leaf),
        leaf_before + Vec2::new(7.0, -3.0)
    ));
}

#[test]
fn test_set_position_propagates_the_delta_not_the_value() {
    let mut world = World::new();
    let (root, mid, leaf) = spawn_chain(&mut world);
    let mid_before = pos_of(&world, mid);
    let leaf_before = pos_of(&world, leaf);

    let mut state =
        SystemState::<(Query<&mut MapPosition>, Query<&Children>)>::new(&mut world);
    {
        let (mut positions, children) = state.get_mut(&mut world);
        set_position(root, Vec2::new(150.0, 80.0), &mut positions, &children);
    }

    let delta = Vec2::new(50.0, -20.0);
    assert!(approx_vec(pos_of(&world, root), Vec2::new(150.0, 80.0)));
    assert!(approx_vec(pos_of(&world, mid), mid_before + delta));
    assert!(approx_vec(pos_of(&world, leaf), leaf_before + delta));
}

#[test]
fn test_set_position_on_missing_entity_is_noop() {
    let mut world = World::new();
    let (root, _, _) = spawn_chain(&mut world);
    let bare = world.spawn_empty().id();

    let mut state =
        SystemState::<(Query<&mut MapPosition>, Query<&Children>)>::new(&mut world);
    {
        let (mut positions, children) = state.get_mut(&mut world);
        set_position(bare, Vec2::new(1.0, 1.0), &mut positions, &children);
    }
    assert!(approx_vec(pos_of(&world, root), Vec2::new(100.0, 100.0)));
}

#[test]
fn test_set_rotation_turns_descendants_by_the_delta() {
    let mut world = World::new();
    let (root, mid, leaf) = spawn_chain(&mut world);

    let mut state = SystemState::<(Query<&mut Rotation>, Query<&Children>)>::new(&mut world);
    {
        let (mut rotations, children) = state.get_mut(&mut world);
        set_rotation(root, 90.0, &mut rotations, &children);
    }

    assert!((world.get::<Rotation>(root).unwrap().degrees - 90.0).abs() < EPSILON);
    assert!((world.get::<Rotation>(mid).unwrap().degrees - 100.0).abs() < EPSILON);
    assert!((world.get::<Rotation>(leaf).unwrap().degrees - 110.0).abs() < EPSILON);
}

#[test]
fn test_set_scale_propagates_component_wise_ratio() {
    let mut world = World::new();
    let parent = world
        .spawn((MapPosition::new(0.0, 0.0), Scale::new(2.0, 2.0)))
        .id();
    let child = world
        .spawn((MapPosition::new(10.0, 0.0), Scale::new(1.0, 3.0)))
        .id();
    set_parent(&mut world, child, parent);

    let mut state = SystemState::<(Query<&mut Scale>, Query<&Children>)>::new(&mut world);
    {
        let (mut scales, children) = state.get_mut(&mut world);
        set_scale(parent, Vec2::new(4.0, 1.0), &mut scales, &children);
    }

    assert!(approx_vec(
        world.get::<Scale>(parent).unwrap().scale,
        Vec2::new(4.0, 1.0)
    ));
    // Ratio (2.0, 0.5) applied to the child's own scale.
    assert!(approx_vec(
        world.get::<Scale>(child).unwrap().scale,
        Vec2::new(2.0, 1.5)
    ));
}

#[test]
fn test_set_scale_from_zero_leaves_descendants_untouched() {
    let mut world = World::new();
    let parent = world
        .spawn((MapPosition::new(0.0, 0.0), Scale::new(0.0, 1.0)))
        .id();
    let child = world
        .spawn((MapPosition::new(5.0, 0.0), Scale::new(1.0, 1.0)))
        .id();
    set_parent(&mut world, child, parent);

    let mut state = SystemState::<(Query<&mut Scale>, Query<&Children>)>::new(&mut world);
    {
        let (mut scales, children) = state.get_mut(&mut world);
        set_scale(parent, Vec2::new(2.0, 2.0), &mut scales, &children);
    }

    // The node itself takes the new scale; no ratio exists for descendants.
    assert!(approx_vec(
        world.get::<Scale>(parent).unwrap().scale,
        Vec2::new(2.0, 2.0)
    ));
    assert!(approx_vec(
        world.get::<Scale>(child).unwrap().scale,
        Vec2::new(1.0, 1.0)
    ));
}
