//! Camera tracking

use crate::ecs::components::{CameraComponent, ParticleComponent};
use crate::ecs::{ComponentKind, System, SystemContext};

/// Moves every camera onto the first [`CameraFollowComponent`] entity
///
/// [`CameraFollowComponent`]: crate::ecs::components::CameraFollowComponent
#[derive(Debug, Default, Clone, Copy)]
pub struct CameraSystem;

impl CameraSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "CameraSystem";

    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for CameraSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let Some(target) = ctx
            .entities
            .first_entity_with(ComponentKind::CameraFollow)
            .and_then(|entity| ctx.entities.get::<ParticleComponent>(entity))
            .map(|particle| particle.position)
        else {
            return;
        };

        for camera in ctx.entities.entities_with(ComponentKind::Camera) {
            if let Some(camera) = ctx.entities.get_mut::<CameraComponent>(camera) {
                camera.position = target;
            }
        }
    }
}
