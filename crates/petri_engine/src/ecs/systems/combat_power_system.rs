//! Combat power from growth

use crate::ecs::components::{CombatComponent, GrowthComponent};
use crate::ecs::{ComponentKind, System, SystemContext};

/// Sets `power = base_power + growth` for every combat entity
#[derive(Debug, Default, Clone, Copy)]
pub struct CombatPowerSystem;

impl CombatPowerSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "CombatPowerSystem";

    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for CombatPowerSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        for entity in ctx.entities.entities_with(ComponentKind::Combat) {
            let growth = ctx.entities.get::<GrowthComponent>(entity).map_or(0, |g| g.power);
            if let Some(combat) = ctx.entities.get_mut::<CombatComponent>(entity) {
                combat.power = combat.base_power.saturating_add(growth);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::system::testing::Harness;

    #[test]
    fn test_power_tracks_growth() {
        let mut harness = Harness::new();
        let cell = harness
            .entities
            .spawn([CombatComponent::new(1).into(), GrowthComponent::new(3).into()]);
        let virus = harness.entities.spawn([CombatComponent::new(5).into()]);

        harness.run(&mut CombatPowerSystem::new(), 0.016);
        assert_eq!(harness.entities.single::<CombatComponent>(cell).power, 4);
        assert_eq!(harness.entities.single::<CombatComponent>(virus).power, 5);

        harness.entities.single_mut::<GrowthComponent>(cell).power = 0;
        harness.run(&mut CombatPowerSystem::new(), 0.016);
        assert_eq!(harness.entities.single::<CombatComponent>(cell).power, 1);
    }
}
