//! Feeds sprites to the graphics adapter

use crate::ecs::components::{CameraComponent, ParticleComponent, SpriteComponent};
use crate::ecs::{ComponentKind, System, SystemContext};
use crate::foundation::math::Vec2;
use crate::render::GraphicsAdapter;

/// Draws every sprite relative to the first camera
///
/// Images are loaded on first use. Adapter errors are logged and the sprite
/// is skipped for that frame.
pub struct RenderingSystem {
    adapter: Box<dyn GraphicsAdapter>,
}

impl RenderingSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "RenderingSystem";

    /// Create a system drawing through `adapter`
    pub fn new(adapter: Box<dyn GraphicsAdapter>) -> Self {
        Self { adapter }
    }

    fn draw(&mut self, sprite: &SpriteComponent, screen: Vec2) {
        if !self.adapter.is_loaded(&sprite.path) {
            if let Err(err) = self.adapter.load_image(&sprite.path) {
                log::error!("{}", err);
                return;
            }
        }
        self.adapter.set_image_scale(&sprite.path, sprite.scale);

        if let Err(err) = self.adapter.render_image(&sprite.path, screen.x, screen.y) {
            log::error!("{}", err);
        }
    }
}

impl System for RenderingSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let camera = ctx
            .entities
            .first_entity_with(ComponentKind::Camera)
            .and_then(|entity| ctx.entities.get::<CameraComponent>(entity))
            .map_or_else(Vec2::zeros, |camera| camera.position);

        for entity in ctx.entities.entities_with(ComponentKind::Sprite) {
            let position = ctx
                .entities
                .get::<ParticleComponent>(entity)
                .map_or_else(Vec2::zeros, |particle| particle.position);

            for sprite in ctx.entities.components::<SpriteComponent>(entity) {
                self.draw(sprite, position + sprite.offset - camera);
            }
        }
    }
}
