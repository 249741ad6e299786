//! Circle collision primitives
//!
//! Narrow-phase tests for the circle-only world. Broad phase is the
//! exhaustive pair scan in the collision system.

use crate::foundation::math::{direction_between, Vec2};

/// A circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// The center position of the circle in world space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

/// Overlap between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first circle's center towards the second's
    pub normal: Vec2,
    /// Distance between the centers
    pub distance: f32,
    /// How far the circles overlap (`radius sum - distance`, positive)
    pub depth: f32,
}

impl Circle {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another.
    ///
    /// Circles that exactly touch do not overlap.
    pub fn intersects(&self, other: &Circle) -> bool {
        let distance = (self.center - other.center).magnitude();
        distance < self.radius + other.radius
    }

    /// Get the penetration depth if intersecting (0.0 if not intersecting)
    pub fn penetration_depth(&self, other: &Circle) -> f32 {
        self.contact(other).map_or(0.0, |contact| contact.depth)
    }

    /// Contact data if the circles overlap
    pub fn contact(&self, other: &Circle) -> Option<Contact> {
        let distance = (self.center - other.center).magnitude();
        let radius_sum = self.radius + other.radius;
        if distance < radius_sum {
            Some(Contact {
                normal: direction_between(self.center, other.center),
                distance,
                depth: radius_sum - distance,
            })
        } else {
            None
        }
    }

    /// Check whether a point lies inside the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.center).magnitude() < self.radius
    }
}
