//! Canvas command plumbing.
//!
//! Visual side effects (attack slashes, dash after-images, the double
//! jump flourish) are written as [`CanvasCmd`] messages by the actor
//! states. The pair below mirrors the audio pump: forward first, then
//! advance the double buffer.

use bevy_ecs::prelude::*;

use crate::events::canvas::CanvasCmd;
use crate::resources::canvas::CanvasBridge;

/// Send buffered canvas commands over the bridge channel.
pub fn forward_canvas_cmds(
    mut reader: MessageReader<CanvasCmd>,
    bridge: Option<Res<CanvasBridge>>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for cmd in reader.read() {
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the canvas message buffer. Runs after [`forward_canvas_cmds`].
pub fn update_canvas_cmds(mut msgs: ResMut<Messages<CanvasCmd>>) {
    msgs.update();
}
