//! Collision shapes attached to entities.
//!
//! A [`Collider`] is either a box or a circle, anchored on the owning
//! entity's [`MapPosition`](crate::components::mapposition::MapPosition) pivot
//! plus an optional offset. The per-frame contact pass
//! ([`crate::systems::collision::collision_step`]) runs the shape tests here
//! for every pair of enabled colliders on active entities.
//!
//! Boxes are *center*-anchored: the entity position is the middle of the
//! rectangle, not a corner. The ground-snap logic in the actor controller
//! relies on this ("rest on top" is `top − height/2`).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Shape parameters of a [`Collider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// Collision shape with routing metadata.
#[derive(Debug, Clone, Component, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset of the shape center from the owner's pivot.
    pub offset: Vec2,
    /// Free-form tag consumed by gameplay code (e.g. `"Ground"`).
    pub tag: String,
    /// Trigger colliders report contacts but take no part in grounding.
    pub is_trigger: bool,
    /// Disabled colliders are skipped by the contact pass.
    pub enabled: bool,
}

impl Collider {
    /// Create a box collider centered on the owner position.
    pub fn new_box(width: f32, height: f32) -> Self {
        Self {
            shape: ColliderShape::Box { width, height },
            offset: Vec2::ZERO,
            tag: String::new(),
            is_trigger: false,
            enabled: true,
        }
    }

    /// Create a circle collider centered on the owner position.
    pub fn new_circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            offset: Vec2::ZERO,
            tag: String::new(),
            is_trigger: false,
            enabled: true,
        }
    }

    /// Modify the collider with an offset from the owner's pivot.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Modify the collider with a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Mark the collider as a trigger.
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Shape center in world space for a given owner position.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }

    /// Returns (min, max) of the world-space AABB for a given owner position.
    /// Handles negative box sizes by normalizing to proper min/max; a circle
    /// yields its bounding square.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let c = self.center(position);
        let half = match self.shape {
            ColliderShape::Box { width, height } => Vec2::new(width.abs(), height.abs()) * 0.5,
            ColliderShape::Circle { radius } => Vec2::splat(radius.abs()),
        };
        (c - half, c + half)
    }

    /// World-space top edge (AABB min y) for a given owner position.
    pub fn top(&self, position: Vec2) -> f32 {
        self.aabb(position).0.y
    }

    /// Half the shape's vertical extent.
    pub fn half_height(&self) -> f32 {
        match self.shape {
            ColliderShape::Box { height, .. } => height.abs() * 0.5,
            ColliderShape::Circle { radius } => radius.abs(),
        }
    }

    /// Owner position that rests this collider exactly on top of `ground_top`.
    pub fn resting_y(&self, ground_top: f32) -> f32 {
        ground_top - self.half_height() - self.offset.y
    }

    /// Shape overlap test against another collider at a different owner
    /// position. Exactly-touching boundaries count as overlapping, so a body
    /// resting on a surface keeps its contact.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        match (self.shape, other.shape) {
            (ColliderShape::Box { .. }, ColliderShape::Box { .. }) => {
                let (min_a, max_a) = self.aabb(position);
                let (min_b, max_b) = other.aabb(other_position);
                min_a.x <= max_b.x && max_a.x >= min_b.x && min_a.y <= max_b.y && max_a.y >= min_b.y
            }
            (ColliderShape::Box { .. }, ColliderShape::Circle { radius }) => {
                box_circle(self.aabb(position), other.center(other_position), radius)
            }
            (ColliderShape::Circle { radius }, ColliderShape::Box { .. }) => {
                box_circle(other.aabb(other_position), self.center(position), radius)
            }
            (
                ColliderShape::Circle { radius: ra },
                ColliderShape::Circle { radius: rb },
            ) => {
                let d = other.center(other_position) - self.center(position);
                let reach = ra.abs() + rb.abs();
                d.length_squared() <= reach * reach
            }
        }
    }
}

/// Clamp the circle center to the box bounds and compare squared distances.
fn box_circle((min, max): (Vec2, Vec2), circle_center: Vec2, radius: f32) -> bool {
    let closest = circle_center.clamp(min, max);
    let d = circle_center - closest;
    d.length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== BOX-BOX TESTS ====================

    #[test]
    fn test_box_box_overlap() {
        let a = Collider::new_box(10.0, 10.0);
        let b = Collider::new_box(10.0, 10.0);
        assert!(a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_box_box_separated() {
        let a = Collider::new_box(10.0, 10.0);
        let b = Collider::new_box(10.0, 10.0);
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_box_box_touching_edges_counts() {
        // Resting contact: bottom edge of a meets top edge of b.
        let a = Collider::new_box(10.0, 10.0);
        let b = Collider::new_box(10.0, 10.0);
        assert!(a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_box_center_anchored() {
        let a = Collider::new_box(10.0, 20.0);
        let (min, max) = a.aabb(Vec2::new(100.0, 50.0));
        assert_eq!(min, Vec2::new(95.0, 40.0));
        assert_eq!(max, Vec2::new(105.0, 60.0));
    }

    #[test]
    fn test_negative_size_normalized() {
        let a = Collider::new_box(-10.0, -20.0);
        let (min, max) = a.aabb(Vec2::ZERO);
        assert_eq!(min, Vec2::new(-5.0, -10.0));
        assert_eq!(max, Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_offset_applied() {
        let a = Collider::new_box(10.0, 10.0).with_offset(Vec2::new(0.0, -10.0));
        let b = Collider::new_box(10.0, 10.0);
        // The offset lifts a's effective center 10 up from its position:
        // at y=10 a would touch b without it, at y=25 the offset center
        // (0, 15) lands on b.
        assert!(!a.overlaps(Vec2::new(0.0, 10.0), &b, Vec2::new(0.0, 15.0)));
        assert!(a.overlaps(Vec2::new(0.0, 25.0), &b, Vec2::new(0.0, 15.0)));
    }

    // ==================== BOX-CIRCLE TESTS ====================

    #[test]
    fn test_box_circle_center_inside() {
        let b = Collider::new_box(10.0, 10.0);
        let c = Collider::new_circle(1.0);
        assert!(b.overlaps(Vec2::ZERO, &c, Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_box_circle_edge_contact() {
        let b = Collider::new_box(10.0, 10.0);
        let c = Collider::new_circle(3.0);
        // Circle center 8 to the right, box half-width 5, gap 3 == radius.
        assert!(b.overlaps(Vec2::ZERO, &c, Vec2::new(8.0, 0.0)));
        assert!(!b.overlaps(Vec2::ZERO, &c, Vec2::new(8.1, 0.0)));
    }

    #[test]
    fn test_box_circle_corner_miss() {
        let b = Collider::new_box(10.0, 10.0);
        let c = Collider::new_circle(3.0);
        // Diagonal distance from corner (5,5) to (8,8) is ~4.24 > 3.
        assert!(!b.overlaps(Vec2::ZERO, &c, Vec2::new(8.0, 8.0)));
    }

    // ==================== CIRCLE-CIRCLE TESTS ====================

    #[test]
    fn test_circle_circle_overlap() {
        let a = Collider::new_circle(5.0);
        let b = Collider::new_circle(5.0);
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(9.0, 0.0)));
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(10.5, 0.0)));
    }

    // ==================== SYMMETRY TESTS ====================

    #[test]
    fn test_overlap_symmetry_all_shape_pairs() {
        let box_a = Collider::new_box(10.0, 10.0);
        let box_b = Collider::new_box(4.0, 16.0);
        let circle_a = Collider::new_circle(5.0);
        let circle_b = Collider::new_circle(2.0);
        let shapes = [&box_a, &box_b, &circle_a, &circle_b];
        let positions = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(-7.0, 2.0),
            Vec2::new(12.0, -1.0),
        ];
        for (i, a) in shapes.iter().enumerate() {
            for (j, b) in shapes.iter().enumerate() {
                let pa = positions[i];
                let pb = positions[j];
                assert_eq!(
                    a.overlaps(pa, b, pb),
                    b.overlaps(pb, a, pa),
                    "asymmetric result for shapes {i} and {j}"
                );
            }
        }
    }

    // ==================== GROUNDING HELPERS ====================

    #[test]
    fn test_top_and_resting_y() {
        let ground = Collider::new_box(1000.0, 150.0);
        let ground_top = ground.top(Vec2::new(500.0, 600.0));
        assert_eq!(ground_top, 525.0);

        let body = Collider::new_box(60.0, 120.0);
        assert_eq!(body.resting_y(ground_top), 525.0 - 60.0);
        assert_eq!(body.half_height(), 60.0);
    }

    #[test]
    fn test_circle_half_height() {
        let c = Collider::new_circle(7.5);
        assert_eq!(c.half_height(), 7.5);
    }
}
