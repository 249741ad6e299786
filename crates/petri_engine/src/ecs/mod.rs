//! Entity-Component-System implementation
//!
//! Entities are ids, components are tagged data records stored by the
//! [`EntityManager`], and systems run over them once per frame in
//! registration order.

pub mod commands;
pub mod component;
pub mod components;
pub mod entity;
pub mod manager;
pub mod system;
pub mod systems;

pub use commands::{CommandBuffer, EntityCommand, SystemCommand};
pub use component::{Component, ComponentData, ComponentKind};
pub use entity::Entity;
pub use manager::{ComponentKey, EcsError, EntityManager};
pub use system::{System, SystemContext};
