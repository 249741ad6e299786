//! Entity templates
//!
//! A [`Prefab`] turns a position and the tuning table into the component list
//! of a new entity. Spawning goes through [`EntityManager::spawn`] or a
//! deferred [`CommandBuffer::spawn`].
//!
//! [`EntityManager::spawn`]: crate::ecs::EntityManager::spawn
//! [`CommandBuffer::spawn`]: crate::ecs::CommandBuffer::spawn

use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{
    AiComponent, CameraComponent, CameraFollowComponent, ColliderComponent, CombatComponent,
    EatableComponent, GrowthComponent, InfectionComponent, InfectionKind, ParticleComponent,
    PlayerComponent, ReproductionComponent, SlowingComponent, SpriteComponent,
};
use crate::ecs::Component;
use crate::foundation::math::{Bounds, Vec2};
use std::fmt;

/// Kind of entity the game knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefab {
    /// AI controlled cell
    Cell,
    /// Player controlled cell followed by the camera
    Player,
    /// Food pellet
    Food,
    /// Strong enemy cells flee from
    Virus,
    /// Infection carrier
    Bacterium,
    /// Area slowing bodies down
    SlowArea,
    /// Area speeding bodies up
    FastArea,
    /// Viewpoint
    Camera,
}

impl Prefab {
    /// Every prefab
    pub const ALL: [Prefab; 8] = [
        Prefab::Cell,
        Prefab::Player,
        Prefab::Food,
        Prefab::Virus,
        Prefab::Bacterium,
        Prefab::SlowArea,
        Prefab::FastArea,
        Prefab::Camera,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Prefab::Cell => "Cell",
            Prefab::Player => "Player",
            Prefab::Food => "Food",
            Prefab::Virus => "Virus",
            Prefab::Bacterium => "Bacterium",
            Prefab::SlowArea => "SlowArea",
            Prefab::FastArea => "FastArea",
            Prefab::Camera => "Camera",
        }
    }

    /// Components of a new instance at `position`
    pub fn components(
        self,
        position: Vec2,
        config: &ConfigTable,
    ) -> Result<Vec<Component>, ConfigError> {
        match self {
            Prefab::Cell => {
                let mut components = cell_body(position, config)?;
                components.push(AiComponent.into());
                Ok(components)
            }
            Prefab::Player => {
                let mut components = cell_body(position, config)?;
                components.push(PlayerComponent.into());
                components.push(CameraFollowComponent.into());
                Ok(components)
            }
            Prefab::Food => Ok(vec![
                body(position, config, "FOOD_INVERSE_MASS")?.into(),
                ColliderComponent::new(config.get_f32("FOOD_COLLIDER_RADIUS")?).into(),
                EatableComponent.into(),
                sprite(config, "FOOD_IMAGE")?.into(),
            ]),
            Prefab::Virus => Ok(vec![
                body(position, config, "VIRUS_INVERSE_MASS")?.into(),
                ColliderComponent::new(config.get_f32("VIRUS_COLLIDER_RADIUS")?).into(),
                CombatComponent::new(config.get_u32("VIRUS_COMBAT_POWER")?).into(),
                sprite(config, "VIRUS_IMAGE")?.into(),
            ]),
            Prefab::Bacterium => {
                let kind: InfectionKind =
                    config.get_parsed("BACTERIUM_INFECTION", "an infection kind")?;
                let duration = config.get_f32("BACTERIUM_INFECTION_DURATION")?;
                let spin = config.get_f32_or("BACTERIUM_ANGULAR_VELOCITY", 0.0)?;
                Ok(vec![
                    body(position, config, "BACTERIUM_INVERSE_MASS")?
                        .with_angular_velocity(spin)
                        .into(),
                    ColliderComponent::new(config.get_f32("BACTERIUM_COLLIDER_RADIUS")?).into(),
                    InfectionComponent::carrier(kind, duration).into(),
                    sprite(config, "BACTERIUM_IMAGE")?.into(),
                ])
            }
            Prefab::SlowArea => area(position, config, "SLOW_AREA"),
            Prefab::FastArea => area(position, config, "FAST_AREA"),
            Prefab::Camera => Ok(vec![
                CameraComponent::new(position, config.get_f32_or("CAMERA_HEIGHT", 1.0)?).into(),
            ]),
        }
    }
}

impl fmt::Display for Prefab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// World rectangle from `WORLD_MIN_X`, `WORLD_MIN_Y`, `WORLD_MAX_X` and `WORLD_MAX_Y`
pub fn world_bounds(config: &ConfigTable) -> Result<Bounds, ConfigError> {
    Ok(Bounds::new(
        Vec2::new(config.get_f32("WORLD_MIN_X")?, config.get_f32("WORLD_MIN_Y")?),
        Vec2::new(config.get_f32("WORLD_MAX_X")?, config.get_f32("WORLD_MAX_Y")?),
    ))
}

fn body(
    position: Vec2,
    config: &ConfigTable,
    inverse_mass_key: &str,
) -> Result<ParticleComponent, ConfigError> {
    Ok(ParticleComponent::new(position, config.get_f32(inverse_mass_key)?)
        .with_damping(config.get_f32_or("DEFAULT_DAMPING", 1.0)?))
}

fn sprite(config: &ConfigTable, key: &str) -> Result<SpriteComponent, ConfigError> {
    Ok(SpriteComponent::new(config.get_path(key)?))
}

fn cell_body(position: Vec2, config: &ConfigTable) -> Result<Vec<Component>, ConfigError> {
    Ok(vec![
        body(position, config, "CELL_INVERSE_MASS")?
            .with_angular_velocity(config.get_f32_or("CELL_ANGULAR_VELOCITY", 0.0)?)
            .into(),
        ColliderComponent::new(config.get_f32("CELL_COLLIDER_RADIUS")?).into(),
        GrowthComponent::default().into(),
        CombatComponent::new(config.get_u32_or("CELL_BASE_COMBAT_POWER", 1)?).into(),
        InfectionComponent::healthy().into(),
        ReproductionComponent::new(config.get_u32_or("CELL_REPRODUCTIONS", 1)?).into(),
        sprite(config, "CELL_IMAGE")?
            .with_scale(config.get_f32_or("CELL_IMAGE_SCALE", 1.0)?)
            .into(),
    ])
}

fn area(position: Vec2, config: &ConfigTable, prefix: &str) -> Result<Vec<Component>, ConfigError> {
    Ok(vec![
        ParticleComponent::immovable(position).into(),
        ColliderComponent::new(config.get_f32(&format!("{prefix}_COLLIDER_RADIUS"))?).into(),
        SlowingComponent::new(config.get_f32(&format!("{prefix}_FACTOR"))?).into(),
        sprite(config, &format!("{prefix}_IMAGE"))?.into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{ComponentKind, EntityManager};

    fn kinds(components: &[Component]) -> Vec<ComponentKind> {
        components.iter().map(Component::kind).collect()
    }

    #[test]
    fn test_every_prefab_builds_from_defaults() {
        let config = ConfigTable::defaults();
        for prefab in Prefab::ALL {
            let components = prefab.components(Vec2::new(1.0, 2.0), &config).unwrap();
            assert!(!components.is_empty(), "{prefab} has no components");
        }
    }

    #[test]
    fn test_player_is_a_steerable_cell() {
        let config = ConfigTable::defaults();
        let player = kinds(&Prefab::Player.components(Vec2::zeros(), &config).unwrap());
        for kind in [
            ComponentKind::Particle,
            ComponentKind::Collider,
            ComponentKind::Growth,
            ComponentKind::Player,
            ComponentKind::CameraFollow,
        ] {
            assert!(player.contains(&kind), "player lacks {kind}");
        }
        assert!(!player.contains(&ComponentKind::Ai));
    }

    #[test]
    fn test_areas_are_immovable_triggers() {
        let config = ConfigTable::defaults();
        let mut entities = EntityManager::new();
        let slow = entities.spawn(Prefab::SlowArea.components(Vec2::zeros(), &config).unwrap());
        let fast = entities.spawn(Prefab::FastArea.components(Vec2::zeros(), &config).unwrap());

        assert!(entities.single::<ParticleComponent>(slow).is_immovable());
        assert!(entities.single::<SlowingComponent>(slow).factor < 1.0);
        assert!(entities.single::<SlowingComponent>(fast).factor > 1.0);
    }

    #[test]
    fn test_bacterium_is_a_carrier() {
        let config = ConfigTable::defaults();
        let mut entities = EntityManager::new();
        let components = Prefab::Bacterium.components(Vec2::zeros(), &config).unwrap();
        let bacterium = entities.spawn(components);
        let infection = entities.single::<InfectionComponent>(bacterium);
        assert!(infection.carrier);
        assert_eq!(infection.kind, InfectionKind::CannotInput);
    }

    #[test]
    fn test_sprite_paths_use_prefix() {
        let mut config = ConfigTable::defaults();
        config.set("$PATH", "/data/");
        let mut entities = EntityManager::new();
        let food = entities.spawn(Prefab::Food.components(Vec2::zeros(), &config).unwrap());
        assert!(entities.single::<SpriteComponent>(food).path.starts_with("/data/"));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = ConfigTable::new();
        assert!(matches!(
            Prefab::Food.components(Vec2::zeros(), &config),
            Err(ConfigError::MissingKey(key)) if key == "FOOD_INVERSE_MASS"
        ));
    }

    #[test]
    fn test_world_bounds_from_defaults() {
        let bounds = world_bounds(&ConfigTable::defaults()).unwrap();
        assert!(bounds.contains(Vec2::zeros()));
    }
}
