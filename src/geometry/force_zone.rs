//! Directional force zones
//!
//! Axis-aligned rectangles that push contained particles along a unit
//! direction (fans). Static for the simulation's lifetime. The push is
//! suppressed when solid geometry occludes the single exit ray (see the
//! force-field solver stage).

use crate::config::constants::GEOMETRY_EPSILON;
use crate::math::Vector;

#[derive(Clone, Copy, Debug)]
pub struct ForceZone {
    pub min: Vector,
    pub max: Vector,
    /// Unit push direction, assumed axis-aligned with one rectangle side.
    pub direction: Vector,
}

impl ForceZone {
    pub fn new(min: Vector, max: Vector, direction: Vector) -> Self {
        Self {
            min,
            max,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Strict containment on all four bounds.
    #[inline(always)]
    pub fn contains(&self, position: Vector) -> bool {
        self.min.x < position.x
            && self.min.y < position.y
            && self.max.x > position.x
            && self.max.y > position.y
    }

    /// Point on the zone side the air enters from (opposite the push
    /// direction), aligned with the particle's previous position. The
    /// occlusion ray is cast from the particle toward this point.
    #[inline]
    pub fn exit_point(&self, prev_position: Vector) -> Vector {
        if self.direction.y > GEOMETRY_EPSILON {
            // Pushing up: air enters through the bottom side.
            Vector::new(prev_position.x, self.min.y)
        } else if self.direction.x < -GEOMETRY_EPSILON {
            // Pushing left: enters through the right side.
            Vector::new(self.max.x, prev_position.y)
        } else if self.direction.x > GEOMETRY_EPSILON {
            // Pushing right: enters through the left side.
            Vector::new(self.min.x, prev_position.y)
        } else {
            // Pushing down (or degenerate): enters through the top side.
            Vector::new(prev_position.x, self.max.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_strict() {
        let zone = ForceZone::new(Vector::ZERO, Vector::new(2.0, 2.0), Vector::new(1.0, 0.0));
        assert!(zone.contains(Vector::new(1.0, 1.0)));
        assert!(!zone.contains(Vector::new(0.0, 1.0)));
        assert!(!zone.contains(Vector::new(2.0, 1.0)));
        assert!(!zone.contains(Vector::new(1.0, 2.0)));
    }

    #[test]
    fn exit_point_is_opposite_the_push_direction() {
        let min = Vector::new(-1.0, -2.0);
        let max = Vector::new(3.0, 4.0);
        let inside = Vector::new(0.5, 0.5);

        let right = ForceZone::new(min, max, Vector::new(1.0, 0.0));
        assert_eq!(right.exit_point(inside), Vector::new(-1.0, 0.5));

        let left = ForceZone::new(min, max, Vector::new(-1.0, 0.0));
        assert_eq!(left.exit_point(inside), Vector::new(3.0, 0.5));

        let up = ForceZone::new(min, max, Vector::new(0.0, 1.0));
        assert_eq!(up.exit_point(inside), Vector::new(0.5, -2.0));

        let down = ForceZone::new(min, max, Vector::new(0.0, -1.0));
        assert_eq!(down.exit_point(inside), Vector::new(0.5, 4.0));
    }

    #[test]
    fn direction_is_normalized() {
        let zone = ForceZone::new(Vector::ZERO, Vector::ONE, Vector::new(3.0, 0.0));
        assert_eq!(zone.direction, Vector::new(1.0, 0.0));
    }
}
