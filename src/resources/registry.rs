//! Scene registry: unique entity names and registration order.
//!
//! The scheduler keys its awake/start passes and the per-frame update order
//! off this resource. Names are unique; registering a duplicate is refused
//! with [`SceneError::DuplicateName`] and leaves the registry untouched.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity name already registered: {0}")]
    DuplicateName(String),
    #[error("unknown entity name: {0}")]
    UnknownName(String),
}

#[derive(Resource, Default)]
pub struct SceneRegistry {
    names: FxHashMap<String, Entity>,
    order: Vec<Entity>,
    started: bool,
}

impl SceneRegistry {
    /// Record `entity` under `name`. Fails without side effects if the name
    /// is taken.
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) -> Result<(), SceneError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }
        self.names.insert(name, entity);
        self.order.push(entity);
        Ok(())
    }

    /// Drop an entity from the registry, returning its name if it was known.
    pub fn remove(&mut self, entity: Entity) -> Option<String> {
        let name = self
            .names
            .iter()
            .find_map(|(n, e)| (*e == entity).then(|| n.clone()))?;
        self.names.remove(&name);
        self.order.retain(|e| *e != entity);
        Some(name)
    }

    pub fn find(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    /// Look up a name that callers expect to be present.
    pub fn require(&self, name: &str) -> Result<Entity, SceneError> {
        self.find(name)
            .ok_or_else(|| SceneError::UnknownName(name.to_string()))
    }

    pub fn name_of(&self, entity: Entity) -> Option<&str> {
        self.names
            .iter()
            .find_map(|(n, e)| (*e == entity).then_some(n.as_str()))
    }

    /// Entities in registration order. Updates iterate in this order.
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    /// Whether the global start pass has run. Entities registered after
    /// that point are awoken and started immediately.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
