//! ECS Components module
//!
//! Plain data records attached to entities. Behaviour lives in the systems.

pub mod collision;
pub mod combat;
pub mod control;
pub mod growth;
pub mod infection;
pub mod particle;
pub mod sprite;

pub use collision::{ColliderComponent, SlowingComponent};
pub use combat::CombatComponent;
pub use control::{AiComponent, PlayerComponent};
pub use growth::{EatableComponent, GrowthComponent, ReproductionComponent};
pub use infection::{InfectionComponent, InfectionKind};
pub use particle::ParticleComponent;
pub use sprite::{CameraComponent, CameraFollowComponent, SpriteComponent};
