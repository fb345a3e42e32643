//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, contact
//! bookkeeping, asset catalogs and the outbound command bridges. Each
//! submodule documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – definitions for animation clips reused across entities
//! - `audio` – sound bank and the channel bridge for audio commands
//! - `canvas` – channel bridge for one-shot effect draw commands
//! - `contacts` – persistent contact pairs backing enter/stay/exit events
//! - `gameconfig` – timing and knight tuning, loadable from INI
//! - `input` – per-frame logical button state with edge flags
//! - `registry` – entity names and registration order for the scheduler
//! - `worldtime` – simulation time, delta and pass counters
pub mod animationstore;
pub mod audio;
pub mod canvas;
pub mod contacts;
pub mod gameconfig;
pub mod input;
pub mod registry;
pub mod worldtime;
