//! Physics module for collision detection
//!
//! Circle narrow-phase primitives. Integration lives on
//! [`ParticleComponent`](crate::ecs::components::ParticleComponent).

pub mod collision;

pub use collision::{Circle, Contact};
