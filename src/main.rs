//! Hollowrun main entry point.
//!
//! The runtime core of a 2D action game, built on:
//! - **bevy_ecs** for entity-component-system architecture
//! - **crossbeam-channel** bridges for audio and effect-draw output
//!
//! This executable runs the demo stage headless: a knight falls onto a
//! ground slab, then a canned input track walks, jumps, double-jumps,
//! dashes, chains a two-hit combo and finally sits on a bench. The audio
//! and draw commands the states emit are drained from the bridge channels
//! and counted (or traced with `--trace-commands`).
//!
//! # Main Loop
//!
//! 1. Build the ECS world, insert the core resources, set up the bridges
//! 2. Spawn and register the stage entities, then start the scene
//! 3. Per frame: clamp the delta, apply input, run the update schedule,
//!    drain the fixed-step accumulator, run the collision pass
//! 4. Shut down the bridges on exit

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;

use hollowrun::components::actor::ActorController;
use hollowrun::components::mapposition::MapPosition;
use hollowrun::game;
use hollowrun::resources::audio::{setup_audio, shutdown_audio};
use hollowrun::resources::canvas::{setup_canvas, shutdown_canvas};
use hollowrun::resources::gameconfig::GameConfig;
use hollowrun::resources::registry::SceneRegistry;
use hollowrun::resources::worldtime::WorldTime;
use hollowrun::scheduler::{self, LifecycleScheduler};

/// Hollowrun runtime core
#[derive(Parser)]
#[command(version, about = "Headless demo of the Hollowrun runtime core")]
struct Cli {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Path to the INI tuning file (defaults stay in effect when missing).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every audio and draw command instead of only the totals.
    #[arg(long)]
    trace_commands: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path.clone()),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    scheduler::install_core(&mut world, config);

    // Bridges must exist before any system writes commands
    let rx_audio = setup_audio(&mut world);
    let rx_canvas = setup_canvas(&mut world);

    if let Err(e) = game::setup_stage(&mut world) {
        log::error!("stage setup failed: {}", e);
        shutdown_canvas(&mut world);
        shutdown_audio(&mut world);
        return;
    }

    let mut frame_driver = LifecycleScheduler::new();
    scheduler::start(&mut world);

    // --------------- Main loop ---------------
    let dt = 1.0 / 60.0;
    let mut sounds = 0usize;
    let mut draws = 0usize;
    for frame in 0..cli.frames {
        frame_driver.run_frame(&mut world, game::demo_script(frame), dt);

        for cmd in rx_audio.try_iter() {
            sounds += 1;
            if cli.trace_commands {
                log::info!("frame {:>4} audio {:?}", frame, cmd);
            }
        }
        for cmd in rx_canvas.try_iter() {
            draws += 1;
            if cli.trace_commands {
                log::info!("frame {:>4} draw {:?}", frame, cmd);
            }
        }
    }

    match world.resource::<SceneRegistry>().require("Player") {
        Ok(player) => {
            let state = world
                .get::<ActorController>(player)
                .and_then(|actor| actor.state());
            let pos = world
                .get::<MapPosition>(player)
                .map(|p| p.pos)
                .unwrap_or_default();
            log::info!(
                "knight finished in {:?} at ({:.1}, {:.1})",
                state,
                pos.x,
                pos.y
            );
        }
        Err(e) => log::warn!("{}", e),
    }
    let time = world.resource::<WorldTime>();
    log::info!(
        "{} frames, {} fixed steps, {} sounds, {} draws",
        time.frame,
        time.fixed_steps,
        sounds,
        draws
    );

    shutdown_canvas(&mut world);
    shutdown_audio(&mut world);
}
