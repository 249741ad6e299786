//! Steering for computer controlled entities
//!
//! An AI entity flees the nearest stronger combatant in sight. With no
//! threat around it chases the nearest food in sight, and otherwise drifts.

use super::steering_blocked;
use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{CombatComponent, ParticleComponent};
use crate::ecs::{ComponentKind, Entity, EntityManager, System, SystemContext};
use crate::foundation::math::{direction_between, Vec2};

/// Flee-or-seek steering
#[derive(Debug, Clone, Copy)]
pub struct AiSystem {
    force: f32,
    sight_radius: f32,
}

impl AiSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "AiSystem";

    /// Create with steering force magnitude and sight radius
    pub fn new(force: f32, sight_radius: f32) -> Self {
        Self { force, sight_radius }
    }

    /// Build from `AI_FORCE` and `AI_SIGHT_RADIUS`
    pub fn from_config(config: &ConfigTable) -> Result<Self, ConfigError> {
        Ok(Self::new(config.get_f32("AI_FORCE")?, config.get_f32("AI_SIGHT_RADIUS")?))
    }

    fn nearest<'a, I>(&self, position: Vec2, candidates: I) -> Option<Vec2>
    where
        I: IntoIterator<Item = &'a Vec2>,
    {
        candidates
            .into_iter()
            .map(|candidate| (*candidate, (*candidate - position).magnitude()))
            .filter(|(_, distance)| *distance <= self.sight_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate)
    }
}

struct Combatant {
    entity: Entity,
    position: Vec2,
    power: u32,
}

fn position_of(entities: &EntityManager, entity: Entity) -> Option<Vec2> {
    entities.get::<ParticleComponent>(entity).map(|particle| particle.position)
}

impl System for AiSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let combatants: Vec<Combatant> = ctx
            .entities
            .entities_with(ComponentKind::Combat)
            .into_iter()
            .filter_map(|entity| {
                Some(Combatant {
                    entity,
                    position: position_of(ctx.entities, entity)?,
                    power: ctx.entities.get::<CombatComponent>(entity)?.power,
                })
            })
            .collect();
        let food: Vec<Vec2> = ctx
            .entities
            .entities_with(ComponentKind::Eatable)
            .into_iter()
            .filter_map(|entity| position_of(ctx.entities, entity))
            .collect();

        for entity in ctx.entities.entities_with(ComponentKind::Ai) {
            if steering_blocked(ctx.entities, entity) {
                continue;
            }
            let Some(position) = position_of(ctx.entities, entity) else {
                continue;
            };
            let own_power = ctx.entities.get::<CombatComponent>(entity).map_or(0, |c| c.power);

            let threats: Vec<Vec2> = combatants
                .iter()
                .filter(|other| other.entity != entity && other.power > own_power)
                .map(|other| other.position)
                .collect();

            let direction = if let Some(threat) = self.nearest(position, &threats) {
                direction_between(threat, position)
            } else if let Some(target) = self.nearest(position, &food) {
                direction_between(position, target)
            } else {
                continue;
            };

            if let Some(particle) = ctx.entities.get_mut::<ParticleComponent>(entity) {
                particle.add_force(direction * self.force);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{AiComponent, EatableComponent, InfectionComponent, InfectionKind};
    use crate::ecs::system::testing::Harness;
    use approx::assert_relative_eq;

    fn ai_cell(harness: &mut Harness, x: f32, power: u32) -> Entity {
        harness.entities.spawn([
            ParticleComponent::new(Vec2::new(x, 0.0), 1.0).into(),
            CombatComponent::new(power).into(),
            AiComponent.into(),
        ])
    }

    fn food(harness: &mut Harness, x: f32, y: f32) -> Entity {
        harness.entities.spawn([
            ParticleComponent::new(Vec2::new(x, y), 1.0).into(),
            EatableComponent.into(),
        ])
    }

    fn force(harness: &Harness, entity: Entity) -> Vec2 {
        harness.entities.single::<ParticleComponent>(entity).force
    }

    #[test]
    fn test_seeks_nearest_food_in_sight() {
        let mut harness = Harness::new();
        let cell = ai_cell(&mut harness, 0.0, 1);
        food(&mut harness, 0.0, 50.0);
        food(&mut harness, 0.0, -80.0);
        food(&mut harness, 10.0, 500.0);

        harness.run(&mut AiSystem::new(10.0, 100.0), 0.016);

        assert_relative_eq!(force(&harness, cell), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_flees_stronger_combatant() {
        let mut harness = Harness::new();
        let cell = ai_cell(&mut harness, 0.0, 1);
        let virus = harness.entities.spawn([
            ParticleComponent::new(Vec2::new(30.0, 0.0), 1.0).into(),
            CombatComponent::new(5).into(),
        ]);
        food(&mut harness, 40.0, 0.0);

        harness.run(&mut AiSystem::new(10.0, 100.0), 0.016);

        assert_relative_eq!(force(&harness, cell), Vec2::new(-10.0, 0.0));
        assert_eq!(force(&harness, virus), Vec2::zeros());
    }

    #[test]
    fn test_ignores_weaker_combatants_and_distant_targets() {
        let mut harness = Harness::new();
        let strong = ai_cell(&mut harness, 0.0, 9);
        let weak = ai_cell(&mut harness, 300.0, 1);

        harness.run(&mut AiSystem::new(10.0, 100.0), 0.016);

        assert_eq!(force(&harness, strong), Vec2::zeros());
        assert_eq!(force(&harness, weak), Vec2::zeros());
    }

    #[test]
    fn test_cannot_input_blocks_steering() {
        let mut harness = Harness::new();
        let cell = ai_cell(&mut harness, 0.0, 1);
        harness
            .entities
            .add_component(cell, InfectionComponent::temporary(InfectionKind::CannotInput, 2.0))
            .unwrap();
        food(&mut harness, 10.0, 0.0);

        harness.run(&mut AiSystem::new(10.0, 100.0), 0.016);

        assert_eq!(force(&harness, cell), Vec2::zeros());
    }
}
