//! Entity registry
//!
//! [`EntityManager`] owns every entity and every component. Components live in
//! a single slot arena; each entity keeps, per kind, the arena keys of its
//! components in insertion order. Deleting an entity frees all of its
//! components in the same call, so no query can ever reach an orphan.

use super::component::{Component, ComponentData, ComponentKind};
use super::entity::Entity;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use thiserror::Error;

new_key_type! {
    /// Arena key of a stored component
    pub struct ComponentKey;
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity was deleted or never created by this manager
    #[error("entity {0} does not exist")]
    NoSuchEntity(Entity),
}

#[derive(Debug, Default)]
struct EntityRecord {
    components: BTreeMap<ComponentKind, Vec<ComponentKey>>,
}

/// Authoritative entity to component mapping
#[derive(Debug, Default)]
pub struct EntityManager {
    next_id: u32,
    entities: BTreeMap<Entity, EntityRecord>,
    components: SlotMap<ComponentKey, Component>,
}

impl EntityManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity with no components
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(entity, EntityRecord::default());
        log::trace!("Created entity {}", entity);
        entity
    }

    /// Create an entity holding `components`
    pub fn spawn<I>(&mut self, components: I) -> Entity
    where
        I: IntoIterator<Item = Component>,
    {
        let entity = self.create_entity();
        for component in components {
            self.insert(entity, component);
        }
        entity
    }

    /// Append a component to the entity's collection of its kind
    pub fn add_component(
        &mut self,
        entity: Entity,
        component: impl Into<Component>,
    ) -> Result<(), EcsError> {
        if !self.contains(entity) {
            return Err(EcsError::NoSuchEntity(entity));
        }
        self.insert(entity, component.into());
        Ok(())
    }

    fn insert(&mut self, entity: Entity, component: Component) {
        let kind = component.kind();
        let key = self.components.insert(component);
        if let Some(record) = self.entities.get_mut(&entity) {
            record.components.entry(kind).or_default().push(key);
        }
    }

    fn keys(&self, entity: Entity, kind: ComponentKind) -> &[ComponentKey] {
        self.entities
            .get(&entity)
            .and_then(|record| record.components.get(&kind))
            .map_or(&[] as &[ComponentKey], Vec::as_slice)
    }

    /// Whether the entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of stored components across all entities
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Every live entity in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys().copied()
    }

    /// All components of `kind` on the entity, in insertion order.
    ///
    /// Empty for unknown entities.
    pub fn components_of_kind(
        &self,
        entity: Entity,
        kind: ComponentKind,
    ) -> impl Iterator<Item = &Component> + '_ {
        self.keys(entity, kind)
            .iter()
            .filter_map(|key| self.components.get(*key))
    }

    /// All components of type `T` on the entity, in insertion order
    pub fn components<'a, T: ComponentData + 'a>(
        &'a self,
        entity: Entity,
    ) -> impl Iterator<Item = &'a T> + 'a {
        self.components_of_kind(entity, T::KIND)
            .filter_map(T::from_component)
    }

    /// Whether the entity has at least one component of `kind`
    pub fn has_component(&self, entity: Entity, kind: ComponentKind) -> bool {
        !self.keys(entity, kind).is_empty()
    }

    /// Whether the entity has at least one `T`
    pub fn has<T: ComponentData>(&self, entity: Entity) -> bool {
        self.has_component(entity, T::KIND)
    }

    /// First component of `kind`, if any
    pub fn get_of_kind(&self, entity: Entity, kind: ComponentKind) -> Option<&Component> {
        self.keys(entity, kind)
            .first()
            .and_then(|key| self.components.get(*key))
    }

    /// First `T` on the entity, if any
    pub fn get<T: ComponentData>(&self, entity: Entity) -> Option<&T> {
        self.get_of_kind(entity, T::KIND)
            .and_then(T::from_component)
    }

    /// Mutable first `T` on the entity, if any
    pub fn get_mut<T: ComponentData>(&mut self, entity: Entity) -> Option<&mut T> {
        let key = *self.keys(entity, T::KIND).first()?;
        self.components.get_mut(key).and_then(T::from_component_mut)
    }

    /// First component of `kind`.
    ///
    /// # Panics
    /// If the entity has no such component. Callers check with
    /// [`has_component`](Self::has_component) first.
    pub fn single_of_kind(&self, entity: Entity, kind: ComponentKind) -> &Component {
        match self.get_of_kind(entity, kind) {
            Some(component) => component,
            None => missing(entity, kind),
        }
    }

    /// First `T` on the entity.
    ///
    /// # Panics
    /// If the entity has no `T`.
    pub fn single<T: ComponentData>(&self, entity: Entity) -> &T {
        match self.get(entity) {
            Some(component) => component,
            None => missing(entity, T::KIND),
        }
    }

    /// Mutable first `T` on the entity.
    ///
    /// # Panics
    /// If the entity has no `T`.
    pub fn single_mut<T: ComponentData>(&mut self, entity: Entity) -> &mut T {
        match self.get_mut(entity) {
            Some(component) => component,
            None => missing(entity, T::KIND),
        }
    }

    /// Every entity holding a component of `kind`, in creation order.
    ///
    /// The returned list is a snapshot. Deleting entities afterwards does not
    /// touch it; callers prune their own working lists.
    pub fn entities_with(&self, kind: ComponentKind) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| record.components.get(&kind).is_some_and(|keys| !keys.is_empty()))
            .map(|(entity, _)| *entity)
            .collect()
    }

    /// Oldest entity holding a component of `kind`
    pub fn first_entity_with(&self, kind: ComponentKind) -> Option<Entity> {
        self.entities
            .iter()
            .find(|(_, record)| record.components.get(&kind).is_some_and(|keys| !keys.is_empty()))
            .map(|(entity, _)| *entity)
    }

    /// Remove the entity and all of its components.
    ///
    /// Returns false when the entity did not exist.
    pub fn delete_entity(&mut self, entity: Entity) -> bool {
        let Some(record) = self.entities.remove(&entity) else {
            return false;
        };
        for key in record.components.into_values().flatten() {
            self.components.remove(key);
        }
        log::trace!("Deleted entity {}", entity);
        true
    }

    /// Remove and return every component of `kind` from the entity
    pub fn take_components_of_kind(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
    ) -> Vec<Component> {
        let keys = self
            .entities
            .get_mut(&entity)
            .and_then(|record| record.components.remove(&kind))
            .unwrap_or_default();
        keys.into_iter()
            .filter_map(|key| self.components.remove(key))
            .collect()
    }

    /// Remove every component of `kind` from the entity, returning how many
    pub fn delete_components_of_kind(&mut self, entity: Entity, kind: ComponentKind) -> usize {
        self.take_components_of_kind(entity, kind).len()
    }

    /// Remove every entity and component. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
    }
}

#[cold]
fn missing(entity: Entity, kind: ComponentKind) -> ! {
    panic!("entity {entity} has no {kind}")
}
