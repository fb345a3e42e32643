//! Integration tests for the scene lifecycle and the frame driver:
//! awake/start ordering, late registration, destroy, and the fixed-step
//! accumulator.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use hollowrun::components::collider::Collider;
use hollowrun::components::lifecycle::Lifecycle;
use hollowrun::components::mapposition::MapPosition;
use hollowrun::events::collision::{CollisionEvent, ContactKind};
use hollowrun::events::lifecycle::{AwakeEvent, StartEvent};
use hollowrun::game;
use hollowrun::resources::contacts::ContactTracker;
use hollowrun::resources::gameconfig::GameConfig;
use hollowrun::resources::input::InputSnapshot;
use hollowrun::resources::registry::{SceneError, SceneRegistry};
use hollowrun::resources::worldtime::WorldTime;
use hollowrun::scheduler::{self, LifecycleScheduler};

#[derive(Resource, Default)]
struct LifecycleLog(Vec<(&'static str, Entity)>);

fn make_world() -> World {
    let mut world = World::new();
    scheduler::install_core(&mut world, GameConfig::new());
    world.insert_resource(game::default_animation_catalog());
    world.insert_resource(game::default_sound_bank());

    world.insert_resource(LifecycleLog::default());
    world.spawn(Observer::new(
        |t: On<AwakeEvent>, mut log: ResMut<LifecycleLog>| {
            log.0.push(("awake", t.event().entity));
        },
    ));
    world.spawn(Observer::new(
        |t: On<StartEvent>, mut log: ResMut<LifecycleLog>| {
            log.0.push(("start", t.event().entity));
        },
    ));
    world.flush();
    world
}

fn spawn_named(world: &mut World, name: &str, active: bool) -> Entity {
    let lifecycle = if active {
        Lifecycle::default()
    } else {
        Lifecycle::inactive()
    };
    let entity = world.spawn((MapPosition::new(0.0, 0.0), lifecycle)).id();
    scheduler::register(world, name, entity).unwrap();
    entity
}

#[test]
fn test_duplicate_name_is_refused_without_side_effects() {
    let mut world = make_world();
    let first = spawn_named(&mut world, "Wall", true);
    let second = world.spawn(Lifecycle::default()).id();

    let result = scheduler::register(&mut world, "Wall", second);
    assert!(matches!(result, Err(SceneError::DuplicateName(_))));

    let registry = world.resource::<SceneRegistry>();
    assert_eq!(registry.find("Wall"), Some(first));
    assert_eq!(registry.len(), 1);
    // The refused entity got neither event.
    assert!(world
        .resource::<LifecycleLog>()
        .0
        .iter()
        .all(|(_, e)| *e != second));
}

#[test]
fn test_every_awake_runs_before_any_start() {
    let mut world = make_world();
    let a = spawn_named(&mut world, "A", true);
    let b = spawn_named(&mut world, "B", false);
    let c = spawn_named(&mut world, "C", true);

    // Nothing fires before the scene starts.
    assert!(world.resource::<LifecycleLog>().0.is_empty());

    scheduler::start(&mut world);

    let log = &world.resource::<LifecycleLog>().0;
    assert_eq!(
        *log,
        vec![
            ("awake", a),
            ("awake", b),
            ("awake", c),
            ("start", a),
            ("start", c),
        ]
    );
    // The inactive entity is awaked but not started.
    let lifecycle = world.get::<Lifecycle>(b).unwrap();
    assert!(lifecycle.awaked && !lifecycle.started);
}

#[test]
fn test_late_registration_gets_awake_and_start_immediately() {
    let mut world = make_world();
    spawn_named(&mut world, "A", true);
    scheduler::start(&mut world);

    let late = spawn_named(&mut world, "Late", true);

    let log = &world.resource::<LifecycleLog>().0;
    assert_eq!(
        log[log.len() - 2..].to_vec(),
        vec![("awake", late), ("start", late)]
    );

    let lifecycle = world.get::<Lifecycle>(late).unwrap();
    assert!(lifecycle.awaked && lifecycle.started);
}

#[test]
fn test_activation_after_start_runs_no_start_pass() {
    let mut world = make_world();
    let dormant = spawn_named(&mut world, "Dormant", false);
    scheduler::start(&mut world);

    scheduler::set_active(&mut world, dormant, true);

    let lifecycle = world.get::<Lifecycle>(dormant).unwrap();
    assert!(lifecycle.active && lifecycle.awaked && !lifecycle.started);
    assert!(!world
        .resource::<LifecycleLog>()
        .0
        .contains(&("start", dormant)));
}

#[test]
fn test_fixed_steps_follow_the_accumulator() {
    let mut world = make_world();
    scheduler::start(&mut world);
    let mut driver = LifecycleScheduler::new();

    // fixed_delta is 0.02: a 0.05 frame yields two steps and carries 0.01.
    driver.run_frame(&mut world, InputSnapshot::default(), 0.05);
    assert_eq!(world.resource::<WorldTime>().fixed_steps, 2);

    // Carried 0.01 plus 0.05 yields three more.
    driver.run_frame(&mut world, InputSnapshot::default(), 0.05);
    assert_eq!(world.resource::<WorldTime>().fixed_steps, 5);

    // A tiny frame may yield none.
    driver.run_frame(&mut world, InputSnapshot::default(), 0.005);
    assert_eq!(world.resource::<WorldTime>().fixed_steps, 5);
}

#[test]
fn test_frame_delta_is_clamped_before_anything_sees_it() {
    let mut world = make_world();
    scheduler::start(&mut world);
    let mut driver = LifecycleScheduler::new();

    driver.run_frame(&mut world, InputSnapshot::default(), 2.0);

    let time = world.resource::<WorldTime>();
    assert!((time.delta - 0.25).abs() < 1e-6);
    // 0.25 / 0.02 => 12 full steps, remainder carried.
    assert_eq!(time.fixed_steps, 12);
}

#[test]
fn test_destroy_exits_contacts_and_unregisters() {
    let mut world = make_world();

    #[derive(Resource, Default)]
    struct ExitLog(Vec<(Entity, Entity)>);
    world.insert_resource(ExitLog::default());
    world.spawn(Observer::new(
        |t: On<CollisionEvent>, mut log: ResMut<ExitLog>| {
            let ev = t.event();
            if ev.kind == ContactKind::Exit {
                log.0.push((ev.a, ev.b));
            }
        },
    ));
    world.flush();

    let a = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            Collider::new_box(10.0, 10.0),
            Lifecycle::default(),
        ))
        .id();
    scheduler::register(&mut world, "A", a).unwrap();
    let b = world
        .spawn((
            MapPosition::new(4.0, 0.0),
            Collider::new_box(10.0, 10.0),
            Lifecycle::default(),
        ))
        .id();
    scheduler::register(&mut world, "B", b).unwrap();
    scheduler::start(&mut world);

    let mut driver = LifecycleScheduler::new();
    driver.run_frame(&mut world, InputSnapshot::default(), 1.0 / 60.0);
    assert_eq!(world.resource::<ContactTracker>().len(), 1);

    scheduler::destroy(&mut world, a);

    assert_eq!(world.resource::<ExitLog>().0.len(), 1);
    assert!(world.resource::<ContactTracker>().is_empty());
    assert_eq!(world.resource::<SceneRegistry>().find("A"), None);
    assert_eq!(world.resource::<SceneRegistry>().find("B"), Some(b));
    assert!(world.get_entity(a).is_err());
}
