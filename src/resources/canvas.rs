// Channel bridge for effect draw commands, mirroring the audio bridge.
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::canvas::CanvasCmd;

/// Sender half of the draw command channel, owned by the ECS world.
#[derive(Resource)]
pub struct CanvasBridge {
    pub tx_cmd: Sender<CanvasCmd>,
}

/// Create the draw command channel and register bridge resources.
///
/// Inserts [`CanvasBridge`] and initializes `Messages<CanvasCmd>`. Returns
/// the receiver for the rendering side; dropping it is fine, sends are
/// then discarded.
pub fn setup_canvas(world: &mut World) -> Receiver<CanvasCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<CanvasCmd>();

    world.insert_resource(CanvasBridge { tx_cmd });
    world.insert_resource(Messages::<CanvasCmd>::default());

    rx_cmd
}

/// Remove the bridge, closing the draw channel.
pub fn shutdown_canvas(world: &mut World) {
    world.remove_resource::<CanvasBridge>();
}
