//! Particle component for bodies that move in the 2D world
//!
//! A particle carries position, velocity and the force accumulated during the
//! current frame. Forces are per-frame impulses: integration consumes them.

use crate::foundation::math::Vec2;

/// Point-mass physics state
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleComponent {
    /// World position
    pub position: Vec2,

    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Force accumulated since the last integration step
    pub force: Vec2,

    /// Inverse mass; zero means immovable (infinite mass)
    pub inverse_mass: f32,

    /// Fraction of velocity kept per second, in [0, 1]
    pub damping: f32,

    /// Orientation in radians
    pub rotation: f32,

    /// Angular velocity in radians per second
    pub angular_velocity: f32,
}

impl ParticleComponent {
    /// Create a resting particle
    pub fn new(position: Vec2, inverse_mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            force: Vec2::zeros(),
            inverse_mass: inverse_mass.max(0.0),
            damping: 1.0,
            rotation: 0.0,
            angular_velocity: 0.0,
        }
    }

    /// Create a particle that no force can move
    pub fn immovable(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    /// Set damping (builder)
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.set_damping(damping);
        self
    }

    /// Set initial velocity (builder)
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set angular velocity (builder)
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set damping, clamped to [0, 1]
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    /// Set inverse mass, clamped to be non-negative
    pub fn set_inverse_mass(&mut self, inverse_mass: f32) {
        self.inverse_mass = inverse_mass.max(0.0);
    }

    /// Accumulate a force for the next integration step
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Whether this particle has infinite mass
    pub fn is_immovable(&self) -> bool {
        self.inverse_mass <= 0.0
    }

    /// Apply one integration step and clear the accumulated force
    pub fn integrate(&mut self, delta_time: f32) {
        if self.is_immovable() {
            self.force = Vec2::zeros();
            return;
        }

        let acceleration = self.force * self.inverse_mass;
        self.velocity += acceleration * delta_time;
        self.velocity *= self.damping.powf(delta_time);
        self.position += self.velocity * delta_time;
        self.rotation += self.angular_velocity * delta_time;

        self.force = Vec2::zeros();
    }
}
