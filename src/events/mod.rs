//! Event and message types exchanged between systems.
//!
//! Entity-targeted events ([`lifecycle`], [`collision`]) are delivered
//! through observers; fire-and-forget commands for external collaborators
//! ([`audio`], [`canvas`]) are buffered messages drained by forwarder
//! systems onto channels.
//!
//! Submodules:
//! - [`audio`] – play/stop commands for the sound backend
//! - [`canvas`] – one-shot effect draw commands for the renderer
//! - [`collision`] – contact enter/stay/exit notifications
//! - [`lifecycle`] – per-entity awake/start notifications

pub mod audio;
pub mod canvas;
pub mod collision;
pub mod lifecycle;
