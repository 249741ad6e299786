//! Physics integration for every particle

use crate::ecs::components::ParticleComponent;
use crate::ecs::{ComponentKind, System, SystemContext};

/// Integrates forces, velocity and rotation once per frame
#[derive(Debug, Default, Clone, Copy)]
pub struct ParticleSystem;

impl ParticleSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "ParticleSystem";

    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for ParticleSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        for entity in ctx.entities.entities_with(ComponentKind::Particle) {
            if let Some(particle) = ctx.entities.get_mut::<ParticleComponent>(entity) {
                particle.integrate(delta_time);
            }
        }
    }
}
