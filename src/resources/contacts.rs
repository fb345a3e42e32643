//! Persistent contact-pair bookkeeping.
//!
//! The collision pass compares the pairs overlapping this frame against
//! this resource to decide which contacts are entering, staying or
//! exiting. A pair's trigger classification is captured when the contact
//! enters and reused for its stay/exit events, so a collider flipping its
//! trigger flag mid-contact cannot split one contact across both event
//! types.

use std::collections::hash_map::Entry;

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

/// Unordered pair of entities in canonical order, usable as a map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContactPair {
    a: Entity,
    b: Entity,
}

impl ContactPair {
    pub fn new(x: Entity, y: Entity) -> Self {
        if x <= y {
            ContactPair { a: x, b: y }
        } else {
            ContactPair { a: y, b: x }
        }
    }

    pub fn a(&self) -> Entity {
        self.a
    }

    pub fn b(&self) -> Entity {
        self.b
    }

    pub fn involves(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }
}

/// Contacts active as of the last collision pass, with the trigger flag
/// captured at enter time.
#[derive(Resource, Default)]
pub struct ContactTracker {
    active: FxHashMap<ContactPair, bool>,
}

impl ContactTracker {
    /// Record a pair as active. Returns `true` if the pair was new; an
    /// already-active pair keeps its original trigger flag.
    pub fn insert(&mut self, pair: ContactPair, trigger: bool) -> bool {
        match self.active.entry(pair) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(trigger);
                true
            }
        }
    }

    /// Forget a pair, returning its captured trigger flag if it was active.
    pub fn remove(&mut self, pair: &ContactPair) -> Option<bool> {
        self.active.remove(pair)
    }

    pub fn is_active(&self, pair: &ContactPair) -> bool {
        self.active.contains_key(pair)
    }

    /// Trigger flag captured when the pair entered.
    pub fn trigger_flag(&self, pair: &ContactPair) -> Option<bool> {
        self.active.get(pair).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContactPair, bool)> {
        self.active.iter().map(|(p, t)| (p, *t))
    }

    /// Active pairs touching `entity`. Used to purge contacts when a
    /// collider goes away mid-frame.
    pub fn pairs_involving(&self, entity: Entity) -> Vec<ContactPair> {
        self.active
            .keys()
            .filter(|p| p.involves(entity))
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_pair_is_canonical() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        assert_eq!(ContactPair::new(a, b), ContactPair::new(b, a));
        assert!(ContactPair::new(a, b).involves(a));
        assert!(ContactPair::new(a, b).involves(b));
    }

    #[test]
    fn test_tracker_keeps_enter_time_trigger_flag() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let pair = ContactPair::new(a, b);

        let mut tracker = ContactTracker::default();
        assert!(tracker.insert(pair, true));
        assert!(!tracker.insert(pair, false));
        assert_eq!(tracker.trigger_flag(&pair), Some(true));
        assert_eq!(tracker.remove(&pair), Some(true));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_pairs_involving_finds_all_pairs_of_an_entity() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();

        let mut tracker = ContactTracker::default();
        tracker.insert(ContactPair::new(a, b), false);
        tracker.insert(ContactPair::new(b, c), false);
        tracker.insert(ContactPair::new(a, c), true);

        let of_b = tracker.pairs_involving(b);
        assert_eq!(of_b.len(), 2);
        assert!(of_b.iter().all(|p| p.involves(b)));
    }
}
