//! System trait and per-frame context

use super::commands::CommandBuffer;
use super::manager::EntityManager;
use crate::config::ConfigTable;
use crate::input::InputState;
use rand::rngs::StdRng;

/// Everything a system may touch during one update
pub struct SystemContext<'a> {
    /// Entity registry, mutated directly or through `commands`
    pub entities: &'a mut EntityManager,
    /// Deferred mutations
    pub commands: &'a mut CommandBuffer,
    /// Tuning table
    pub config: &'a ConfigTable,
    /// Input held this frame
    pub input: &'a InputState,
    /// Shared random source
    pub rng: &'a mut StdRng,
}

/// System trait for processing entities and components
///
/// Systems hold configuration only. Component state is fetched from the
/// registry on every update.
pub trait System {
    /// Unique name, used to delete the system later
    fn name(&self) -> &str;

    /// Run the system for one frame
    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32);
}
