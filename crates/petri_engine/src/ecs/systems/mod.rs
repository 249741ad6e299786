//! ECS Systems module
//!
//! Each system runs once per frame in the order it was registered with the
//! engine. The order is part of the game's behaviour: a system sees every
//! mutation made by the systems registered before it in the same frame.

pub mod ai_system;
pub mod camera_system;
pub mod collision_system;
pub mod combat_power_system;
pub mod infection_system;
pub mod particle_system;
pub mod player_control_system;
pub mod rendering_system;
pub mod reproduction_system;
pub mod spawning_system;

pub use ai_system::AiSystem;
pub use camera_system::CameraSystem;
pub use collision_system::CollisionSystem;
pub use combat_power_system::CombatPowerSystem;
pub use infection_system::InfectionSystem;
pub use particle_system::ParticleSystem;
pub use player_control_system::PlayerControlSystem;
pub use rendering_system::RenderingSystem;
pub use reproduction_system::ReproductionSystem;
pub use spawning_system::SpawningSystem;

use crate::ecs::components::{InfectionComponent, SpriteComponent};
use crate::ecs::{ComponentKind, Entity, EntityManager};

/// Swap the entity's primary sprite, keeping every secondary layer.
///
/// An entity without sprites gets `sprite` as its only layer.
pub(crate) fn replace_primary_sprite(
    entities: &mut EntityManager,
    entity: Entity,
    sprite: SpriteComponent,
) {
    let mut layers = entities.take_components_of_kind(entity, ComponentKind::Sprite);
    if layers.is_empty() {
        layers.push(sprite.into());
    } else {
        layers[0] = sprite.into();
    }

    for layer in layers {
        if let Err(err) = entities.add_component(entity, layer) {
            log::warn!("Could not restore sprite layer: {}", err);
        }
    }
}

/// Whether an infection currently blocks steering of the entity
pub(crate) fn steering_blocked(entities: &EntityManager, entity: Entity) -> bool {
    entities
        .get::<InfectionComponent>(entity)
        .is_some_and(InfectionComponent::blocks_input)
}
