//! Runtime systems.
//!
//! This module groups the per-frame logic that drives the simulation.
//!
//! Submodules overview
//! - [`actor`] – knight integration, state transitions and lifecycle observers
//! - [`actorstates`] – per-state update functions of the knight
//! - [`animation`] – advance animation playback from the store timings
//! - [`audio`] – forward queued audio commands to the playback channel
//! - [`bench`] – sit down / stand up interaction with benches
//! - [`collision`] – overlap diffing and enter/stay/exit event emission
//! - [`hierarchy`] – parent/child transform propagation helpers
//! - [`input`] – fold input snapshots into [`crate::resources::input::InputState`]
//! - [`render`] – forward queued effect draw commands to the render channel
//! - [`time`] – update simulation time, delta and the fixed-step counter

pub mod actor;
pub mod actorstates;
pub mod animation;
pub mod audio;
pub mod bench;
pub mod collision;
pub mod hierarchy;
pub mod input;
pub mod render;
pub mod time;
