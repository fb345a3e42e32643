//! Audio command plumbing.
//!
//! Gameplay systems write [`AudioCmd`] messages during the update pass;
//! [`forward_audio_cmds`] drains them onto the bridge channel and
//! [`update_audio_cmds`] advances the double buffer. Both run chained at
//! the end of the update schedule so commands leave the world the same
//! frame they were written.

use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::resources::audio::AudioBridge;

/// Send buffered audio commands over the bridge channel. Without a bridge
/// (tests, headless runs) the commands are simply dropped by the pump.
pub fn forward_audio_cmds(mut reader: MessageReader<AudioCmd>, bridge: Option<Res<AudioBridge>>) {
    let Some(bridge) = bridge else {
        return;
    };
    for cmd in reader.read() {
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the audio message buffer. Runs after [`forward_audio_cmds`].
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}
