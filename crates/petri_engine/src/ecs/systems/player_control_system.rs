//! Player steering from keyboard and mouse

use super::steering_blocked;
use crate::config::{ConfigError, ConfigTable};
use crate::ecs::components::{CameraComponent, ParticleComponent};
use crate::ecs::{ComponentKind, System, SystemContext};
use crate::foundation::math::{normalize_or_zero, Vec2};
use crate::input::{InputState, KeyCode, MouseButton};

/// Pushes the player cell along the held direction
///
/// Screen space has y growing downwards, so `W` and `Up` push towards -y.
#[derive(Debug, Clone, Copy)]
pub struct PlayerControlSystem {
    force: f32,
}

impl PlayerControlSystem {
    /// Name the engine registers this system under
    pub const NAME: &'static str = "PlayerControlSystem";

    /// Create with steering force magnitude
    pub fn new(force: f32) -> Self {
        Self { force }
    }

    /// Build from `PLAYER_FORCE`
    pub fn from_config(config: &ConfigTable) -> Result<Self, ConfigError> {
        Ok(Self::new(config.get_f32("PLAYER_FORCE")?))
    }
}

fn key_direction(input: &InputState) -> Vec2 {
    let mut direction = Vec2::zeros();
    if input.is_key_down(KeyCode::W) || input.is_key_down(KeyCode::Up) {
        direction.y -= 1.0;
    }
    if input.is_key_down(KeyCode::S) || input.is_key_down(KeyCode::Down) {
        direction.y += 1.0;
    }
    if input.is_key_down(KeyCode::A) || input.is_key_down(KeyCode::Left) {
        direction.x -= 1.0;
    }
    if input.is_key_down(KeyCode::D) || input.is_key_down(KeyCode::Right) {
        direction.x += 1.0;
    }
    normalize_or_zero(direction)
}

impl System for PlayerControlSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let Some(player) = ctx
            .entities
            .entities_with(ComponentKind::Player)
            .into_iter()
            .find(|entity| ctx.entities.has::<ParticleComponent>(*entity))
        else {
            return;
        };
        if steering_blocked(ctx.entities, player) {
            return;
        }

        let camera = ctx
            .entities
            .first_entity_with(ComponentKind::Camera)
            .and_then(|camera| ctx.entities.get::<CameraComponent>(camera))
            .map_or_else(Vec2::zeros, |camera| camera.position);

        let Some(particle) = ctx.entities.get_mut::<ParticleComponent>(player) else {
            return;
        };

        let mut direction = key_direction(ctx.input);
        if direction == Vec2::zeros() && ctx.input.is_mouse_down(MouseButton::Left) {
            let target = ctx.input.mouse_position() + camera;
            direction = normalize_or_zero(target - particle.position);
        }

        if direction != Vec2::zeros() {
            particle.add_force(direction * self.force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{InfectionComponent, InfectionKind, PlayerComponent};
    use crate::ecs::system::testing::Harness;
    use crate::ecs::Entity;
    use crate::input::InputEvent;
    use approx::assert_relative_eq;

    fn player(harness: &mut Harness) -> Entity {
        harness.entities.spawn([
            ParticleComponent::new(Vec2::new(100.0, 100.0), 1.0).into(),
            PlayerComponent.into(),
        ])
    }

    fn force(harness: &Harness, entity: Entity) -> Vec2 {
        harness.entities.single::<ParticleComponent>(entity).force
    }

    #[test]
    fn test_keys_push_in_screen_space() {
        let mut harness = Harness::new();
        let entity = player(&mut harness);
        harness.input.apply(InputEvent::KeyPressed(KeyCode::W));

        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);

        assert_relative_eq!(force(&harness, entity), Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut harness = Harness::new();
        let entity = player(&mut harness);
        harness.input.apply(InputEvent::KeyPressed(KeyCode::Down));
        harness.input.apply(InputEvent::KeyPressed(KeyCode::Right));

        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);

        assert_relative_eq!(force(&harness, entity).magnitude(), 10.0, epsilon = 1e-4);
        assert!(force(&harness, entity).x > 0.0 && force(&harness, entity).y > 0.0);
    }

    #[test]
    fn test_mouse_pulls_towards_cursor() {
        let mut harness = Harness::new();
        let entity = player(&mut harness);
        harness.entities.spawn([CameraComponent::new(Vec2::new(50.0, 0.0), 1.0).into()]);
        harness.input.apply(InputEvent::MouseMoved { x: 50.0, y: 100.0 });
        harness.input.apply(InputEvent::MousePressed(MouseButton::Left));

        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);

        // Cursor sits exactly on the player
        assert_relative_eq!(force(&harness, entity), Vec2::zeros());

        harness.input.apply(InputEvent::MouseMoved { x: 50.0, y: 0.0 });
        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);
        assert_relative_eq!(force(&harness, entity), Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_no_input_no_force() {
        let mut harness = Harness::new();
        let entity = player(&mut harness);
        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);
        assert_eq!(force(&harness, entity), Vec2::zeros());
    }

    #[test]
    fn test_cannot_input_blocks_player() {
        let mut harness = Harness::new();
        let entity = player(&mut harness);
        harness
            .entities
            .add_component(entity, InfectionComponent::permanent(InfectionKind::CannotInput))
            .unwrap();
        harness.input.apply(InputEvent::KeyPressed(KeyCode::A));

        harness.run(&mut PlayerControlSystem::new(10.0), 0.016);

        assert_eq!(force(&harness, entity), Vec2::zeros());
    }
}
