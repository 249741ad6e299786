//! Deferred mutations issued by systems
//!
//! Entity commands are applied right after the issuing system returns, so
//! later systems of the same frame see them. System commands change the
//! system list itself and wait for the frame boundary.

use super::component::{Component, ComponentKind};
use super::entity::Entity;
use super::manager::EntityManager;
use super::system::System;
use std::fmt;

/// Deferred change to the entity registry
#[derive(Debug, Clone, PartialEq)]
pub enum EntityCommand {
    /// Create an entity with these components
    Spawn(Vec<Component>),
    /// Delete an entity
    Delete(Entity),
    /// Attach a component
    AddComponent(Entity, Component),
    /// Remove every component of a kind
    RemoveComponents(Entity, ComponentKind),
}

/// Deferred change to the engine's system list
pub enum SystemCommand {
    /// Append a system
    Add(Box<dyn System>),
    /// Delete the system with this name
    Delete(String),
    /// Remove every system
    ClearSystems,
    /// Remove every entity
    ClearEntities,
}

impl fmt::Debug for SystemCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemCommand::Add(system) => f.debug_tuple("Add").field(&system.name()).finish(),
            SystemCommand::Delete(name) => f.debug_tuple("Delete").field(name).finish(),
            SystemCommand::ClearSystems => f.write_str("ClearSystems"),
            SystemCommand::ClearEntities => f.write_str("ClearEntities"),
        }
    }
}

/// Queue of deferred commands
#[derive(Debug, Default)]
pub struct CommandBuffer {
    entity_commands: Vec<EntityCommand>,
    system_commands: Vec<SystemCommand>,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue creation of an entity
    pub fn spawn(&mut self, components: Vec<Component>) {
        self.entity_commands.push(EntityCommand::Spawn(components));
    }

    /// Queue deletion of an entity
    pub fn delete(&mut self, entity: Entity) {
        self.entity_commands.push(EntityCommand::Delete(entity));
    }

    /// Queue attaching a component
    pub fn add_component(&mut self, entity: Entity, component: impl Into<Component>) {
        self.entity_commands
            .push(EntityCommand::AddComponent(entity, component.into()));
    }

    /// Queue removal of every component of `kind`
    pub fn remove_components(&mut self, entity: Entity, kind: ComponentKind) {
        self.entity_commands
            .push(EntityCommand::RemoveComponents(entity, kind));
    }

    /// Queue a new system
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.system_commands.push(SystemCommand::Add(system));
    }

    /// Queue deletion of a system by name
    pub fn delete_system(&mut self, name: impl Into<String>) {
        self.system_commands.push(SystemCommand::Delete(name.into()));
    }

    /// Queue removal of every system
    pub fn clear_systems(&mut self) {
        self.system_commands.push(SystemCommand::ClearSystems);
    }

    /// Queue removal of every entity
    pub fn clear_entities(&mut self) {
        self.system_commands.push(SystemCommand::ClearEntities);
    }

    /// Queued entity commands
    pub fn entity_commands(&self) -> &[EntityCommand] {
        &self.entity_commands
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.entity_commands.is_empty() && self.system_commands.is_empty()
    }

    /// Drop everything queued
    pub fn clear(&mut self) {
        self.entity_commands.clear();
        self.system_commands.clear();
    }

    /// Apply and drain the entity commands in issue order.
    ///
    /// Returns the entities spawned. Commands aimed at entities that no
    /// longer exist are dropped with a warning.
    pub fn apply_entity_commands(&mut self, entities: &mut EntityManager) -> Vec<Entity> {
        let mut spawned = Vec::new();

        for command in self.entity_commands.drain(..) {
            match command {
                EntityCommand::Spawn(components) => spawned.push(entities.spawn(components)),
                EntityCommand::Delete(entity) => {
                    if !entities.delete_entity(entity) {
                        log::warn!("Dropped delete of missing entity {}", entity);
                    }
                }
                EntityCommand::AddComponent(entity, component) => {
                    let kind = component.kind();
                    if entities.add_component(entity, component).is_err() {
                        log::warn!("Dropped {} for missing entity {}", kind, entity);
                    }
                }
                EntityCommand::RemoveComponents(entity, kind) => {
                    if entities.contains(entity) {
                        entities.delete_components_of_kind(entity, kind);
                    } else {
                        log::warn!("Dropped removal of {} from missing entity {}", kind, entity);
                    }
                }
            }
        }

        spawned
    }

    /// Drain the system commands for the engine to apply
    pub fn take_system_commands(&mut self) -> Vec<SystemCommand> {
        std::mem::take(&mut self.system_commands)
    }
}
