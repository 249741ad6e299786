//! Timed status effects
//!
//! Temporary infections count down and wear off; `StrongImpulses` hosts get
//! kicked by random forces. Both effects are evaluated every frame and are
//! independent of each other. Carriers are immune to their own infection.

use super::replace_primary_sprite;
use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{InfectionComponent, InfectionKind, ParticleComponent, SpriteComponent};
use crate::ecs::{ComponentKind, System, SystemContext};
use crate::foundation::math::Vec2;
use rand::Rng;

/// Per-frame probability of a strong impulse
pub const DEFAULT_IMPULSE_CHANCE: f32 = 0.1;

/// Drives infection timers and impulses
#[derive(Debug, Clone)]
pub struct InfectionSystem {
    impulse_chance: f32,
    impulse_force: f32,
    default_sprite: Option<SpriteComponent>,
}

impl InfectionSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "InfectionSystem";

    /// Create with impulse magnitude `impulse_force` and the default chance
    pub fn new(impulse_force: f32) -> Self {
        Self {
            impulse_chance: DEFAULT_IMPULSE_CHANCE,
            impulse_force,
            default_sprite: None,
        }
    }

    /// Build from `INFECTION_IMPULSES_*` and the cell appearance keys
    pub fn from_config(config: &ConfigTable) -> Result<Self, ConfigError> {
        let chance = config.get_f32_or("INFECTION_IMPULSES_CHANCE", DEFAULT_IMPULSE_CHANCE)?;
        let mut system =
            Self::new(config.get_f32("INFECTION_IMPULSES_FORCE")?).with_impulse_chance(chance);
        if config.contains("CELL_IMAGE") {
            system = system.with_default_sprite(
                SpriteComponent::new(config.get_path("CELL_IMAGE")?)
                    .with_scale(config.get_f32_or("CELL_IMAGE_SCALE", 1.0)?),
            );
        }
        Ok(system)
    }

    /// Set the impulse probability, clamped to [0, 1] (builder)
    pub fn with_impulse_chance(mut self, chance: f32) -> Self {
        self.impulse_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Sprite restored when an infection wears off (builder)
    pub fn with_default_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.default_sprite = Some(sprite);
        self
    }
}

impl System for InfectionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        for entity in ctx.entities.entities_with(ComponentKind::Infection) {
            let Some(infection) = ctx.entities.get_mut::<InfectionComponent>(entity) else {
                continue;
            };
            if infection.carrier {
                continue;
            }

            let cured = infection.tick(delta_time);
            let impulses = infection.kind == InfectionKind::StrongImpulses;

            if cured {
                log::debug!("Entity {} recovered from its infection", entity);
                if let Some(sprite) = &self.default_sprite {
                    replace_primary_sprite(ctx.entities, entity, sprite.clone());
                }
            }

            if impulses && ctx.rng.gen::<f32>() < self.impulse_chance {
                let force = Vec2::new(ctx.rng.gen_range(-1.0..=1.0), ctx.rng.gen_range(-1.0..=1.0))
                    * self.impulse_force;
                if let Some(particle) = ctx.entities.get_mut::<ParticleComponent>(entity) {
                    particle.add_force(force);
                    log::trace!("Entity {} received impulse {:?}", entity, force);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::system::testing::Harness;
    use approx::assert_relative_eq;

    #[test]
    fn test_infection_wears_off_and_restores_sprite() {
        let mut harness = Harness::new();
        let cell = harness.entities.spawn([
            InfectionComponent::temporary(InfectionKind::CannotInput, 0.5).into(),
            SpriteComponent::new("sick.png").into(),
            SpriteComponent::new("nucleus.png").into(),
        ]);

        let mut system =
            InfectionSystem::new(10.0).with_default_sprite(SpriteComponent::new("cell.png"));
        harness.run(&mut system, 0.5);

        let infection = harness.entities.single::<InfectionComponent>(cell);
        assert_eq!(infection.kind, InfectionKind::NoInfection);
        assert!(!infection.temporary);
        let sprites: Vec<_> = harness
            .entities
            .components::<SpriteComponent>(cell)
            .map(|sprite| sprite.path.as_str())
            .collect();
        assert_eq!(sprites, ["cell.png", "nucleus.png"]);
    }

    #[test]
    fn test_infection_counts_down() {
        let mut harness = Harness::new();
        let cell = harness
            .entities
            .spawn([InfectionComponent::temporary(InfectionKind::CannotInput, 2.0).into()]);

        harness.run(&mut InfectionSystem::new(10.0), 0.5);

        let infection = harness.entities.single::<InfectionComponent>(cell);
        assert_relative_eq!(infection.remaining_time, 1.5);
        assert_eq!(infection.kind, InfectionKind::CannotInput);
        assert!(infection.temporary);
    }

    #[test]
    fn test_cure_without_default_sprite_keeps_layers() {
        let mut harness = Harness::new();
        let cell = harness.entities.spawn([
            InfectionComponent::temporary(InfectionKind::CannotInput, 0.1).into(),
            SpriteComponent::new("sick.png").into(),
        ]);

        harness.run(&mut InfectionSystem::new(10.0), 1.0);

        assert_eq!(harness.entities.single::<SpriteComponent>(cell).path, "sick.png");
    }

    #[test]
    fn test_strong_impulses_push_within_magnitude() {
        let mut harness = Harness::new();
        let cell = harness.entities.spawn([
            InfectionComponent::permanent(InfectionKind::StrongImpulses).into(),
            ParticleComponent::new(Vec2::zeros(), 1.0).into(),
        ]);

        let mut system = InfectionSystem::new(100.0).with_impulse_chance(1.0);
        harness.run(&mut system, 0.016);

        let force = harness.entities.single::<ParticleComponent>(cell).force;
        assert!(force != Vec2::zeros());
        assert!(force.x.abs() <= 100.0 && force.y.abs() <= 100.0);
    }

    #[test]
    fn test_zero_chance_never_pushes() {
        let mut harness = Harness::new();
        let cell = harness.entities.spawn([
            InfectionComponent::permanent(InfectionKind::StrongImpulses).into(),
            ParticleComponent::new(Vec2::zeros(), 1.0).into(),
        ]);

        let mut system = InfectionSystem::new(100.0).with_impulse_chance(0.0);
        for _ in 0..50 {
            harness.run(&mut system, 0.016);
        }

        assert_eq!(harness.entities.single::<ParticleComponent>(cell).force, Vec2::zeros());
    }

    #[test]
    fn test_carriers_are_unaffected() {
        let mut harness = Harness::new();
        let bacterium = harness.entities.spawn([
            InfectionComponent::carrier(InfectionKind::StrongImpulses, 3.0).into(),
            ParticleComponent::new(Vec2::zeros(), 1.0).into(),
        ]);

        let mut system = InfectionSystem::new(100.0).with_impulse_chance(1.0);
        harness.run(&mut system, 10.0);

        let infection = harness.entities.single::<InfectionComponent>(bacterium);
        assert_eq!(infection.kind, InfectionKind::StrongImpulses);
        assert_eq!(harness.entities.single::<ParticleComponent>(bacterium).force, Vec2::zeros());
    }

    #[test]
    fn test_from_config_defaults() {
        let system = InfectionSystem::from_config(&ConfigTable::defaults()).unwrap();
        assert_relative_eq!(system.impulse_chance, 0.1);
        assert!(system.default_sprite.is_some());
    }
}
