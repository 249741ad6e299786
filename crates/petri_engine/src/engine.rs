//! Core engine implementation
//!
//! The engine owns the entity registry, the ordered system list, the tuning
//! table, input and the random source. One call to [`Engine::update`] is one
//! frame: every system runs once, in registration order, on this thread.

use crate::{
    config::{Config, ConfigError, ConfigTable},
    ecs::{CommandBuffer, EcsError, EntityManager, System, SystemCommand, SystemContext},
    input::{InputEvent, InputManager, InputState},
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main engine struct
///
/// Constructed once at program start and dropped at teardown. Level changes
/// go through [`reset`](Self::reset).
pub struct Engine {
    entities: EntityManager,
    systems: Vec<Box<dyn System>>,
    commands: CommandBuffer,
    table: ConfigTable,
    input: InputManager,
    rng: StdRng,
    config: EngineConfig,
    frame: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, table: ConfigTable) -> Self {
        log::info!("Initializing engine (rng seed {})", config.rng_seed);

        Self {
            entities: EntityManager::new(),
            systems: Vec::new(),
            commands: CommandBuffer::new(),
            table,
            input: InputManager::new(),
            rng: StdRng::seed_from_u64(config.rng_seed),
            config,
            frame: 0,
        }
    }

    /// Append a system; it runs after every system already registered
    pub fn add_system(&mut self, system: Box<dyn System>) -> Result<(), EngineError> {
        if self.has_system(system.name()) {
            return Err(EngineError::DuplicateSystem(system.name().to_string()));
        }
        log::info!("Added system {}", system.name());
        self.systems.push(system);
        Ok(())
    }

    /// Remove the system called `name`. Returns false if there was none.
    pub fn delete_system(&mut self, name: &str) -> bool {
        let before = self.systems.len();
        self.systems.retain(|system| system.name() != name);
        let removed = self.systems.len() != before;
        if removed {
            log::info!("Deleted system {}", name);
        }
        removed
    }

    /// Whether a system called `name` is registered
    pub fn has_system(&self, name: &str) -> bool {
        self.systems.iter().any(|system| system.name() == name)
    }

    /// Registered system names in run order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Remove every system
    pub fn clear_systems(&mut self) {
        log::info!("Cleared {} system(s)", self.systems.len());
        self.systems.clear();
    }

    /// Remove every entity
    pub fn clear_entities(&mut self) {
        log::info!("Cleared {} entities", self.entities.entity_count());
        self.entities.clear();
    }

    /// Level transition point: no systems, no entities, no pending commands
    pub fn reset(&mut self) {
        self.clear_systems();
        self.clear_entities();
        self.commands.clear();
    }

    /// Feed platform input into the input manager
    pub fn process_input<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.input.process(events);
    }

    /// Run one frame of `delta_time` seconds
    pub fn update(&mut self, delta_time: f32) {
        for system in &mut self.systems {
            let mut ctx = SystemContext {
                entities: &mut self.entities,
                commands: &mut self.commands,
                config: &self.table,
                input: self.input.state(),
                rng: &mut self.rng,
            };
            system.update(&mut ctx, delta_time);
            self.commands.apply_entity_commands(&mut self.entities);
        }

        for command in self.commands.take_system_commands() {
            self.apply_system_command(command);
        }

        self.frame += 1;
        log::trace!("Frame {} done, {} entities", self.frame, self.entities.entity_count());
    }

    /// Run `frames` frames at the configured fixed time step
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.update(self.config.fixed_time_step);
        }
    }

    fn apply_system_command(&mut self, command: SystemCommand) {
        match command {
            SystemCommand::Add(system) => {
                if let Err(err) = self.add_system(system) {
                    log::warn!("{}", err);
                }
            }
            SystemCommand::Delete(name) => {
                if !self.delete_system(&name) {
                    log::warn!("Dropped delete of unknown system {}", name);
                }
            }
            SystemCommand::ClearSystems => self.clear_systems(),
            SystemCommand::ClearEntities => self.clear_entities(),
        }
    }

    /// Entity registry
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Mutable entity registry, for level setup between frames
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// Tuning table
    pub fn table(&self) -> &ConfigTable {
        &self.table
    }

    /// Engine settings
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Input manager, for registering handlers
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Input state as systems see it
    pub fn input(&self) -> &InputState {
        self.input.state()
    }

    /// Shared random source
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Number of completed frames
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds simulated per frame by [`Engine::run`]
    pub fixed_time_step: f32,

    /// Frames a headless run steps before stopping
    pub frame_limit: u64,

    /// Seed for the shared random source
    pub rng_seed: u64,

    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Frame rate the driver throttles to; zero runs unthrottled
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: 1.0 / 60.0,
            frame_limit: 600,
            rng_seed: 0,
            log_level: "info".to_string(),
            target_fps: 0,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entity registry error
    #[error("Entity error: {0}")]
    Ecs(#[from] EcsError),

    /// A system with this name is already registered
    #[error("System {0} is already registered")]
    DuplicateSystem(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{EatableComponent, GrowthComponent};
    use crate::ecs::{ComponentKind, Entity};
    use crate::foundation::time::Timer;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records its name, and optionally issues commands, every frame
    struct Recorder {
        name: String,
        log: Log,
        action: fn(&mut SystemContext<'_>),
    }

    impl Recorder {
        fn boxed(name: &str, log: &Log, action: fn(&mut SystemContext<'_>)) -> Box<dyn System> {
            Box::new(Self {
                name: name.to_string(),
                log: Rc::clone(log),
                action,
            })
        }
    }

    impl System for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
            let count = ctx.entities.entities_with(ComponentKind::Eatable).len();
            self.log.borrow_mut().push(format!("{}:{}", self.name, count));
            (self.action)(ctx);
        }
    }

    fn idle(_: &mut SystemContext<'_>) {}

    fn spawn_food(ctx: &mut SystemContext<'_>) {
        ctx.commands.spawn(vec![EatableComponent.into()]);
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), ConfigTable::defaults())
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let log = Log::default();
        let mut engine = engine();
        engine.add_system(Recorder::boxed("b", &log, idle)).unwrap();
        engine.add_system(Recorder::boxed("a", &log, idle)).unwrap();

        engine.update(0.016);

        assert_eq!(*log.borrow(), ["b:0", "a:0"]);
        assert_eq!(engine.system_names(), ["b", "a"]);
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn test_entity_commands_visible_to_later_systems() {
        let log = Log::default();
        let mut engine = engine();
        engine.add_system(Recorder::boxed("first", &log, idle)).unwrap();
        engine.add_system(Recorder::boxed("spawner", &log, spawn_food)).unwrap();
        engine.add_system(Recorder::boxed("last", &log, idle)).unwrap();

        engine.update(0.016);

        assert_eq!(*log.borrow(), ["first:0", "spawner:0", "last:1"]);
    }

    #[test]
    fn test_duplicate_system_rejected() {
        let log = Log::default();
        let mut engine = engine();
        engine.add_system(Recorder::boxed("a", &log, idle)).unwrap();
        assert!(matches!(
            engine.add_system(Recorder::boxed("a", &log, idle)),
            Err(EngineError::DuplicateSystem(name)) if name == "a"
        ));
    }

    #[test]
    fn test_delete_system() {
        let log = Log::default();
        let mut engine = engine();
        engine.add_system(Recorder::boxed("a", &log, idle)).unwrap();
        assert!(engine.delete_system("a"));
        assert!(!engine.delete_system("a"));
        assert!(!engine.has_system("a"));
    }

    #[test]
    fn test_system_commands_apply_at_frame_boundary() {
        fn remove_self(ctx: &mut SystemContext<'_>) {
            ctx.commands.delete_system("quitter");
            ctx.commands.clear_entities();
        }

        let log = Log::default();
        let mut engine = engine();
        engine.entities_mut().spawn([EatableComponent.into()]);
        engine.add_system(Recorder::boxed("quitter", &log, remove_self)).unwrap();
        engine.add_system(Recorder::boxed("watcher", &log, idle)).unwrap();

        engine.update(0.016);
        assert_eq!(*log.borrow(), ["quitter:1", "watcher:1"]);
        assert_eq!(engine.system_names(), ["watcher"]);
        assert_eq!(engine.entities().entity_count(), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let log = Log::default();
        let mut engine = engine();
        let food: Entity = engine.entities_mut().spawn([GrowthComponent::default().into()]);
        engine.add_system(Recorder::boxed("a", &log, idle)).unwrap();

        engine.reset();

        assert!(engine.system_names().is_empty());
        assert!(!engine.entities().contains(food));
        engine.update(0.016);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_default_config_is_unthrottled() {
        let config = EngineConfig::default();
        assert_eq!(config.target_fps, 0);
        assert_eq!(Timer::new().remaining_frame_budget(config.target_fps), Duration::ZERO);
    }

    #[test]
    fn test_run_steps_frames() {
        let mut engine = engine();
        engine.run(5);
        assert_eq!(engine.frame(), 5);
    }

    #[test]
    fn test_engine_config_round_trips_through_files() {
        let dir = std::env::temp_dir();
        let config = EngineConfig {
            rng_seed: 42,
            frame_limit: 10,
            ..EngineConfig::default()
        };

        for name in ["petri_engine_config_test.toml", "petri_engine_config_test.ron"] {
            let path = dir.join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(EngineConfig::load_from_file(&path).unwrap(), config);
            let _ = std::fs::remove_file(&path);
        }
    }
}
