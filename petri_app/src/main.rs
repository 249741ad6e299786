//! Headless petri dish simulation
//!
//! Usage: `petri_sim [TABLE.cfg|TABLE.toml] [ENGINE.toml|ENGINE.ron]`
//!
//! The tuning table overlays the built-in defaults. The engine settings file
//! supplies the time step, frame limit, seed and log level. A non-zero
//! `target_fps` paces the loop in real time; zero steps as fast as possible.

mod level;

use petri_engine::foundation::logging;
use petri_engine::prelude::*;
use std::path::PathBuf;

fn load_settings() -> Result<(EngineConfig, ConfigTable), ConfigError> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);

    let mut table = ConfigTable::defaults();
    if let Some(path) = args.next() {
        table.merge(ConfigTable::load_from_file(&path)?);
    }

    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default(),
    };

    Ok((config, table))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, table) = load_settings()?;

    let level = table.log_level().unwrap_or(&config.log_level).to_string();
    logging::init_with_level(&level);

    log::info!("Starting petri dish simulation for {} frames", config.frame_limit);

    let frame_limit = config.frame_limit;
    let target_fps = config.target_fps;
    let mut engine = Engine::new(config, table);
    level::build(&mut engine, Box::new(HeadlessAdapter::new()))?;

    let mut timer = Timer::new();
    for _ in 0..frame_limit {
        engine.update(engine.config().fixed_time_step);

        let pause = timer.remaining_frame_budget(target_fps);
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
        timer.update();

        if level::player_lost(&engine) {
            log::info!("Player was lost on frame {}", engine.frame());
            break;
        }
    }

    let player_power = engine
        .entities()
        .first_entity_with(ComponentKind::Player)
        .and_then(|player| engine.entities().get::<GrowthComponent>(player))
        .map_or(0, |growth| growth.power);

    log::info!(
        "Finished {} frames in {:.2}s ({:.0} fps): {} entities, player power {}",
        engine.frame(),
        timer.total_time(),
        timer.average_fps(),
        engine.entities().entity_count(),
        player_power
    );

    Ok(())
}
