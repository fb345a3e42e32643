//! Audio commands produced by gameplay systems.
//!
//! States emit these as buffered messages; a forwarder system drains them
//! onto the channel owned by [`crate::resources::audio::AudioBridge`] so the
//! playback side (the demo binary, or nothing in tests) can consume them
//! without the core knowing about an audio backend.
//!
//! Sound groups ("sword" picking one of three swings) are resolved to a
//! concrete id *before* the command is written, by
//! [`crate::resources::audio::SoundBank::resolve`].

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Play a one-shot effect by concrete id.
    PlayFx { id: String },
    /// Stop every playing effect.
    StopAllFx,
}
