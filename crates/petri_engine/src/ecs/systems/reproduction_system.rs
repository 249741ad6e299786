//! Cell division

use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{GrowthComponent, ParticleComponent, ReproductionComponent};
use crate::ecs::{ComponentKind, System, SystemContext};
use crate::foundation::math::Vec2;
use crate::prefab::Prefab;

/// Spends growth power to spawn offspring next to the parent
#[derive(Debug, Clone, Copy)]
pub struct ReproductionSystem {
    threshold: u32,
    offset: f32,
    offspring: Prefab,
}

impl ReproductionSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "ReproductionSystem";

    /// Reproduce once growth reaches `threshold`, placing the child `offset` units to the right
    pub fn new(threshold: u32, offset: f32) -> Self {
        Self {
            threshold,
            offset,
            offspring: Prefab::Cell,
        }
    }

    /// Build from `REPRODUCTION_POWER` and `REPRODUCTION_OFFSET`
    pub fn from_config(config: &ConfigTable) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.get_u32("REPRODUCTION_POWER")?,
            config.get_f32("REPRODUCTION_OFFSET")?,
        ))
    }

    /// Prefab spawned as offspring (builder)
    pub fn with_offspring(mut self, offspring: Prefab) -> Self {
        self.offspring = offspring;
        self
    }
}

impl System for ReproductionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        for entity in ctx.entities.entities_with(ComponentKind::Reproduction) {
            let Some(position) = ctx.entities.get::<ParticleComponent>(entity).map(|p| p.position)
            else {
                continue;
            };
            let Some(power) = ctx.entities.get::<GrowthComponent>(entity).map(|g| g.power) else {
                continue;
            };
            if power < self.threshold {
                continue;
            }

            let Some(reproduction) = ctx.entities.get_mut::<ReproductionComponent>(entity) else {
                continue;
            };
            if reproduction.remaining == 0 {
                continue;
            }
            reproduction.remaining -= 1;
            reproduction.reproduced = true;

            if let Some(growth) = ctx.entities.get_mut::<GrowthComponent>(entity) {
                growth.power -= self.threshold;
            }

            let child_position = position + Vec2::new(self.offset, 0.0);
            match self.offspring.components(child_position, ctx.config) {
                Ok(components) => {
                    log::debug!("Entity {} reproduced", entity);
                    ctx.commands.spawn(components);
                }
                Err(err) => log::error!("Entity {} could not reproduce: {}", entity, err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::system::testing::Harness;
    use approx::assert_relative_eq;

    fn parent(harness: &mut Harness, power: u32, times: u32) -> crate::ecs::Entity {
        harness.entities.spawn([
            ParticleComponent::new(Vec2::new(10.0, 20.0), 1.0).into(),
            GrowthComponent::new(power).into(),
            ReproductionComponent::new(times).into(),
        ])
    }

    #[test]
    fn test_reproduces_at_threshold() {
        let mut harness = Harness::new();
        let cell = parent(&mut harness, 6, 1);

        harness.run(&mut ReproductionSystem::new(5, 45.0), 0.016);

        assert_eq!(harness.entities.entity_count(), 2);
        assert_eq!(harness.entities.single::<GrowthComponent>(cell).power, 1);
        let reproduction = harness.entities.single::<ReproductionComponent>(cell);
        assert_eq!(reproduction.remaining, 0);
        assert!(reproduction.reproduced);

        let child = harness
            .entities
            .entities()
            .find(|entity| *entity != cell)
            .unwrap();
        let position = harness.entities.single::<ParticleComponent>(child).position;
        assert_relative_eq!(position, Vec2::new(55.0, 20.0));
    }

    #[test]
    fn test_below_threshold_or_exhausted_does_nothing() {
        let mut harness = Harness::new();
        let weak = parent(&mut harness, 4, 1);
        let exhausted = parent(&mut harness, 9, 0);

        harness.run(&mut ReproductionSystem::new(5, 45.0), 0.016);

        assert_eq!(harness.entities.entity_count(), 2);
        assert_eq!(harness.entities.single::<GrowthComponent>(weak).power, 4);
        assert_eq!(harness.entities.single::<GrowthComponent>(exhausted).power, 9);
    }
}
