//! Collision components
//!
//! Bodies collide as circles centred on their particle position.

/// Smallest radius a collider may have
pub const MIN_COLLIDER_RADIUS: f32 = 1.0e-3;

/// Marks an entity as taking part in circle-circle collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderComponent {
    /// Circle radius, always positive
    pub radius: f32,
}

impl ColliderComponent {
    /// Create a collider; non-positive radii are raised to [`MIN_COLLIDER_RADIUS`]
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(MIN_COLLIDER_RADIUS),
        }
    }
}

/// Area trigger that scales the velocity of any body overlapping it
///
/// A factor below one slows bodies down, above one speeds them up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowingComponent {
    /// Velocity multiplier applied once per frame of overlap
    pub factor: f32,
}

impl SlowingComponent {
    /// Create an area with the given factor (negative factors become zero)
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.max(0.0),
        }
    }
}
