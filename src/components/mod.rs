//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world. Components define data such as position, collision shape,
//! animation playback and the knight's action state.
//!
//! Submodules overview:
//! - [`actor`] – knight controller: action states, tuning and motion state
//! - [`animator`] – sprite animation playback state (current key, frame, facing)
//! - [`bench`] – seat interactable the knight can sit on
//! - [`collider`] – box/circle collision shape with tag, offset and trigger flag
//! - [`lifecycle`] – active/awaked/started flags driving the scheduler passes
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – 2D scale factor
//! - [`statemachine`] – generic current/previous state holder

pub mod actor;
pub mod animator;
pub mod bench;
pub mod collider;
pub mod lifecycle;
pub mod mapposition;
pub mod rotation;
pub mod scale;
pub mod statemachine;
