//! Hollowrun runtime core.
//!
//! This module exposes the runtime's ECS components, resources, systems,
//! events and the frame scheduler for use in integration tests and as a
//! reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod scheduler;
pub mod systems;
