//! Math utilities and types
//!
//! Provides the 2D vector type used by every physics component and a few
//! helpers the collision and steering code share.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Unit vector pointing from `from` to `to`.
///
/// Coincident points have no direction; +X is returned so callers that push
/// bodies apart still make progress.
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let length = delta.magnitude();
    if length <= f32::EPSILON {
        Vec2::x()
    } else {
        delta / length
    }
}

/// Normalize `v`, returning zero for zero-length input.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let length = v.magnitude();
    if length <= f32::EPSILON {
        Vec2::zeros()
    } else {
        v / length
    }
}

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Bounds {
    /// Create bounds from two corners in any order
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Check whether a point lies inside (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Uniformly distributed point inside the bounds
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = if self.max.x > self.min.x {
            rng.gen_range(self.min.x..self.max.x)
        } else {
            self.min.x
        };
        let y = if self.max.y > self.min.y {
            rng.gen_range(self.min.y..self.max.y)
        } else {
            self.min.y
        };
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_direction_between() {
        let dir = direction_between(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_relative_eq!(dir.x, 0.6);
        assert_relative_eq!(dir.y, 0.8);
    }

    #[test]
    fn test_direction_between_coincident_points() {
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(direction_between(p, p), Vec2::x());
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(Vec2::zeros()), Vec2::zeros());
        assert_relative_eq!(normalize_or_zero(Vec2::new(0.0, -2.0)).y, -1.0);
    }

    #[test]
    fn test_bounds_random_point_inside() {
        let bounds = Bounds::new(Vec2::new(10.0, -5.0), Vec2::new(-10.0, 5.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(bounds.contains(bounds.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        let bounds = Bounds::new(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bounds.random_point(&mut rng), Vec2::new(2.0, 2.0));
    }
}
