//! One-shot draw commands for visual effects.
//!
//! Attack slashes, dash after-images and the double-jump ring are not
//! entities; the states that own them emit a [`CanvasCmd`] per draw, same
//! frame as the triggering tick. A forwarder system moves them onto the
//! channel in [`crate::resources::canvas::CanvasBridge`] for whatever
//! renderer sits on the other side.

use bevy_ecs::message::Message;
use glam::Vec2;

#[derive(Message, Debug, Clone)]
pub enum CanvasCmd {
    /// Draw one frame of a named effect sheet, centered at `pos`.
    ///
    /// `flip_x` mirrors the image for a left-facing actor. `alpha` is
    /// opacity in `0.0..=1.0`, `scale` a uniform size factor.
    DrawEffect {
        key: String,
        frame: usize,
        pos: Vec2,
        flip_x: bool,
        scale: f32,
        alpha: f32,
    },
}
