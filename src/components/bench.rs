// Bench the knight can sit on. Interaction logic lives in crate::systems::bench.
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug)]
pub struct BenchSeat {
    /// Interaction radius around the bench origin.
    pub radius: f32,
    /// Seat anchor relative to the bench origin.
    pub seat_offset: Vec2,
    /// Vertical lift applied when standing up, keeps the knight clear of
    /// the seat collider.
    pub stand_raise: f32,
    /// Minimum seconds between two interact triggers.
    pub cooldown: f32,
    pub cooldown_left: f32,
    pub occupied: bool,
    pub in_range: bool,
}

impl BenchSeat {
    pub fn new(radius: f32) -> Self {
        BenchSeat {
            radius,
            ..BenchSeat::default()
        }
    }
}

impl Default for BenchSeat {
    fn default() -> Self {
        BenchSeat {
            radius: 80.0,
            seat_offset: Vec2::new(0.0, -30.0),
            stand_raise: 10.0,
            cooldown: 0.1,
            cooldown_left: 0.0,
            occupied: false,
            in_range: false,
        }
    }
}
