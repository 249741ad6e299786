//! Demo level: population and system order

use petri_engine::prefab::world_bounds;
use petri_engine::prelude::*;
use thiserror::Error;

/// Errors raised while building a level
#[derive(Error, Debug)]
pub enum LevelError {
    /// Engine rejected a system
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Tuning table lacks a key or holds a bad value
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Population counts per prefab, in spawn order
const POPULATION: [(Prefab, &str); 6] = [
    (Prefab::SlowArea, "LEVEL_NUM_SLOW_AREAS"),
    (Prefab::FastArea, "LEVEL_NUM_FAST_AREAS"),
    (Prefab::Food, "LEVEL_NUM_FOOD"),
    (Prefab::Cell, "LEVEL_NUM_CELLS"),
    (Prefab::Virus, "LEVEL_NUM_VIRUSES"),
    (Prefab::Bacterium, "LEVEL_NUM_BACTERIA"),
];

/// Reset the engine and build the demo level
///
/// Systems are registered so that steering writes forces before collision,
/// collision resolves before integration, and rendering sees final positions.
pub fn build(engine: &mut Engine, adapter: Box<dyn GraphicsAdapter>) -> Result<(), LevelError> {
    engine.reset();

    let table = engine.table().clone();
    let bounds = world_bounds(&table)?;

    let camera = Prefab::Camera.components(Vec2::zeros(), &table)?;
    engine.entities_mut().spawn(camera);
    let player = Prefab::Player.components(Vec2::zeros(), &table)?;
    engine.entities_mut().spawn(player);

    for (prefab, key) in POPULATION {
        let count = table.get_u32(key)?;
        for _ in 0..count {
            let position = bounds.random_point(engine.rng_mut());
            let components = prefab.components(position, &table)?;
            engine.entities_mut().spawn(components);
        }
        log::debug!("Spawned {} x {}", count, prefab);
    }

    engine.add_system(Box::new(PlayerControlSystem::from_config(&table)?))?;
    engine.add_system(Box::new(AiSystem::from_config(&table)?))?;
    engine.add_system(Box::new(CombatPowerSystem::new()))?;
    engine.add_system(Box::new(CollisionSystem::from_config(&table)?))?;
    engine.add_system(Box::new(InfectionSystem::from_config(&table)?))?;
    engine.add_system(Box::new(ReproductionSystem::from_config(&table)?))?;
    engine.add_system(Box::new(SpawningSystem::food(&table)?))?;
    engine.add_system(Box::new(ParticleSystem::new()))?;
    engine.add_system(Box::new(CameraSystem::new()))?;
    engine.add_system(Box::new(RenderingSystem::new(adapter)))?;

    log::info!(
        "Level ready: {} entities, systems {:?}",
        engine.entities().entity_count(),
        engine.system_names()
    );
    Ok(())
}

/// Whether the player has been lost (the level's lose condition)
pub fn player_lost(engine: &Engine) -> bool {
    engine.entities().first_entity_with(ComponentKind::Player).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_builds_from_defaults() {
        let mut engine = Engine::new(EngineConfig::default(), ConfigTable::defaults());
        build(&mut engine, Box::new(HeadlessAdapter::new())).unwrap();

        assert_eq!(engine.system_names().len(), 10);
        assert!(!player_lost(&engine));
        assert!(engine.entities().first_entity_with(ComponentKind::Camera).is_some());

        engine.run(30);
        assert_eq!(engine.frame(), 30);
    }

    #[test]
    fn test_rebuild_replaces_previous_level() {
        let mut engine = Engine::new(EngineConfig::default(), ConfigTable::defaults());
        build(&mut engine, Box::new(HeadlessAdapter::new())).unwrap();
        let first = engine.entities().entity_count();
        build(&mut engine, Box::new(HeadlessAdapter::new())).unwrap();
        assert_eq!(engine.entities().entity_count(), first);
    }
}
