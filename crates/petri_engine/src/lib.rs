//! # Petri Engine
//!
//! Simulation core of a 2D cell-eating game: an entity-component-system
//! registry, circle collision with type-dependent resolution, force based
//! particle physics and timed status effects.
//!
//! ## Features
//!
//! - **ECS**: tagged component records in a slot arena, queried by kind
//! - **Deferred commands**: systems spawn and delete through a command buffer
//! - **Collision**: exhaustive pair scan with eat, area and separation rules
//! - **Configuration**: key/value tuning tables plus serde engine settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use petri_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = ConfigTable::defaults();
//!     let mut engine = Engine::new(EngineConfig::default(), table.clone());
//!
//!     engine.add_system(Box::new(ParticleSystem::new()))?;
//!     engine.add_system(Box::new(CollisionSystem::from_config(&table)?))?;
//!
//!     let food = Prefab::Food.components(Vec2::new(10.0, 0.0), &table)?;
//!     engine.entities_mut().spawn(food);
//!
//!     engine.run(60);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod prefab;
pub mod render;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigTable},
        ecs::{
            components::*, systems::*, CommandBuffer, Component, ComponentData, ComponentKind,
            EcsError, Entity, EntityManager, System, SystemContext,
        },
        foundation::{
            math::{Bounds, Vec2},
            time::Timer,
        },
        input::{InputEvent, InputManager, InputState, InputTrigger, KeyCode, MouseButton},
        prefab::Prefab,
        render::{GraphicsAdapter, HeadlessAdapter, RenderError},
        Engine, EngineConfig, EngineError,
    };
}
