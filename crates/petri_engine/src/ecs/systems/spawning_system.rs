//! Periodic random spawning of a prefab

use crate::config::{ConfigError, ConfigTable};
use crate::ecs::{System, SystemContext};
use crate::foundation::math::Bounds;
use crate::prefab::{world_bounds, Prefab};
use rand::Rng;

/// Shortest allowed spawning period in seconds
pub const MIN_SPAWNING_PERIOD: f32 = 1.0e-3;

/// Every `period` seconds, spawns `prefab` with probability `chance`
#[derive(Debug, Clone)]
pub struct SpawningSystem {
    name: String,
    prefab: Prefab,
    chance: f32,
    period: f32,
    bounds: Bounds,
    elapsed: f32,
}

impl SpawningSystem {
    /// Create a spawner placing `prefab` uniformly inside `bounds`
    pub fn new(prefab: Prefab, chance: f32, period: f32, bounds: Bounds) -> Self {
        Self {
            name: format!("SpawningSystem<{}>", prefab.name()),
            prefab,
            chance: chance.clamp(0.0, 1.0),
            period: period.max(MIN_SPAWNING_PERIOD),
            bounds,
            elapsed: 0.0,
        }
    }

    /// Food spawner built from `FOOD_SPAWNING_*` and the world bounds
    pub fn food(config: &ConfigTable) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Prefab::Food,
            config.get_f32("FOOD_SPAWNING_CHANCE")?,
            config.get_f32("FOOD_SPAWNING_PERIOD")?,
            world_bounds(config)?,
        ))
    }

    /// Prefab this system spawns
    pub fn prefab(&self) -> Prefab {
        self.prefab
    }
}

impl System for SpawningSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        self.elapsed += delta_time;

        while self.elapsed >= self.period {
            self.elapsed -= self.period;

            if ctx.rng.gen::<f32>() >= self.chance {
                continue;
            }

            let position = self.bounds.random_point(&mut *ctx.rng);
            match self.prefab.components(position, ctx.config) {
                Ok(components) => {
                    log::trace!("Spawning {} at {:?}", self.prefab.name(), position);
                    ctx.commands.spawn(components);
                }
                Err(err) => log::error!("Could not spawn {}: {}", self.prefab.name(), err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{EatableComponent, ParticleComponent};
    use crate::ecs::system::testing::Harness;
    use crate::foundation::math::Vec2;

    fn bounds() -> Bounds {
        Bounds::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0))
    }

    #[test]
    fn test_spawns_once_per_elapsed_period() {
        let mut harness = Harness::new();
        let mut system = SpawningSystem::new(Prefab::Food, 1.0, 1.0, bounds());

        harness.run(&mut system, 0.6);
        assert_eq!(harness.entities.entity_count(), 0);
        harness.run(&mut system, 0.6);
        assert_eq!(harness.entities.entity_count(), 1);
        harness.run(&mut system, 2.0);
        assert_eq!(harness.entities.entity_count(), 3);

        for entity in harness.entities.entities() {
            assert!(harness.entities.has::<EatableComponent>(entity));
            let position = harness.entities.single::<ParticleComponent>(entity).position;
            assert!(bounds().contains(position));
        }
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut harness = Harness::new();
        let mut system = SpawningSystem::new(Prefab::Food, 0.0, 0.1, bounds());
        harness.run(&mut system, 10.0);
        assert_eq!(harness.entities.entity_count(), 0);
    }

    #[test]
    fn test_name_includes_prefab() {
        let system = SpawningSystem::food(&ConfigTable::defaults()).unwrap();
        assert_eq!(system.name(), "SpawningSystem<Food>");
        assert_eq!(system.prefab(), Prefab::Food);
    }
}
