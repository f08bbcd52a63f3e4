//! Boundary polylines and segment intersection
//!
//! A boundary is an ordered, non-closed point sequence; points are consumed
//! as `point[i-1] -> point[i]` edges. Boundaries may translate between steps;
//! the per-step delta is tracked so collision sweeps can start from the
//! particle's previous position as seen by the moved geometry.

use crate::config::constants::GEOMETRY_EPSILON;
use crate::math::{Vector, cross};

/// Solid polyline edge particles collide against.
#[derive(Clone, Debug)]
pub struct Boundary {
    points: Vec<Vector>,
    translation: Vector,
}

impl Boundary {
    pub fn new(points: Vec<Vector>) -> Self {
        Self {
            points,
            translation: Vector::ZERO,
        }
    }

    /// Move the whole boundary. Applied uniformly to all points; the delta
    /// accumulates until the next simulation step consumes it.
    pub fn translate(&mut self, delta: Vector) {
        for point in &mut self.points {
            *point += delta;
        }
        self.translation += delta;
    }

    #[inline(always)]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Movement since the last step.
    #[inline(always)]
    pub fn translation(&self) -> Vector {
        self.translation
    }

    pub(crate) fn clear_translation(&mut self) {
        self.translation = Vector::ZERO;
    }

    /// Consecutive-point edges of the polyline.
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = (Vector, Vector)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Exact 2D segment intersection between a boundary edge and a motion
/// segment. Returns the intersection point, or `None` when the segments are
/// parallel, collinear without overlap, or miss each other. The collinear
/// overlap case returns the first contained endpoint.
pub fn segment_intersection(
    edge0: Vector,
    edge1: Vector,
    from: Vector,
    to: Vector,
) -> Option<Vector> {
    let start_offset = from - edge0;
    let edge = edge1 - edge0;
    let motion = to - from;

    let offset_cross_edge = cross(start_offset, edge);
    let offset_cross_motion = cross(start_offset, motion);
    let edge_cross_motion = cross(edge, motion);

    if offset_cross_edge.abs() <= GEOMETRY_EPSILON {
        // Motion start lies on the edge's carrier line.
        if (from - edge0).dot(from - edge1) < GEOMETRY_EPSILON {
            // Between the edge endpoints.
            return Some(from);
        }
        if (edge0 - from).dot(edge0 - to) < GEOMETRY_EPSILON {
            // Edge start lies inside the motion segment; return the endpoint
            // met first along the path.
            return Some(if start_offset.dot(edge) < 0.0 { edge0 } else { edge1 });
        }
        // Same line, no overlap.
        return None;
    }

    if edge_cross_motion.abs() <= GEOMETRY_EPSILON {
        // Parallel.
        return None;
    }

    let inv = 1.0 / edge_cross_motion;
    let t = offset_cross_motion * inv;
    let u = offset_cross_edge * inv;

    if t > -GEOMETRY_EPSILON
        && t < 1.0 + GEOMETRY_EPSILON
        && u > -GEOMETRY_EPSILON
        && u < 1.0 + GEOMETRY_EPSILON
    {
        Some(edge0 + edge * t)
    } else {
        None
    }
}

/// Boolean form of the intersection test, used for occlusion rays where the
/// hit point is irrelevant.
pub fn segments_intersect(edge0: Vector, edge1: Vector, from: Vector, to: Vector) -> bool {
    let start_offset = from - edge0;
    let edge = edge1 - edge0;
    let motion = to - from;

    let offset_cross_edge = cross(start_offset, edge);
    let offset_cross_motion = cross(start_offset, motion);
    let edge_cross_motion = cross(edge, motion);

    if offset_cross_edge.abs() <= GEOMETRY_EPSILON {
        // Collinear: intersect when the ray start straddles the edge
        // endpoints on either axis.
        return ((from.x - edge0.x < 0.0) != (from.x - edge1.x < 0.0))
            || ((from.y - edge0.y < 0.0) != (from.y - edge1.y < 0.0));
    }

    if edge_cross_motion.abs() <= GEOMETRY_EPSILON {
        return false;
    }

    let inv = 1.0 / edge_cross_motion;
    let t = offset_cross_motion * inv;
    let u = offset_cross_edge * inv;

    t > -GEOMETRY_EPSILON
        && t < 1.0 + GEOMETRY_EPSILON
        && u > -GEOMETRY_EPSILON
        && u < 1.0 + GEOMETRY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_return_exact_point() {
        let hit = segment_intersection(
            Vector::new(0.0, -1.0),
            Vector::new(0.0, 1.0),
            Vector::new(-1.0, 0.0),
            Vector::new(1.0, 0.0),
        );
        let point = hit.expect("segments cross");
        assert!(point.distance(Vector::ZERO) <= f32::EPSILON);
    }

    #[test]
    fn shared_endpoint_counts_as_hit() {
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(2.0, 0.0),
            Vector::new(1.0, 1.0),
            Vector::new(1.0, 0.0),
        );
        let point = hit.expect("endpoint touch");
        assert!(point.distance(Vector::new(1.0, 0.0)) <= 1e-6);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(2.0, 0.0),
            Vector::new(0.0, 1.0),
            Vector::new(2.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn disjoint_bounding_boxes_never_intersect() {
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 1.0),
            Vector::new(5.0, 5.0),
            Vector::new(6.0, 7.0),
        );
        assert!(hit.is_none());
        assert!(!segments_intersect(
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 1.0),
            Vector::new(5.0, 5.0),
            Vector::new(6.0, 7.0),
        ));
    }

    #[test]
    fn collinear_overlap_returns_contained_endpoint() {
        // Motion start sits between the edge endpoints on the same line.
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(4.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(5.0, 0.0),
        );
        assert_eq!(hit, Some(Vector::new(1.0, 0.0)));
    }

    #[test]
    fn collinear_disjoint_returns_none() {
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(3.0, 0.0),
            Vector::new(5.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn collinear_motion_through_edge_returns_first_endpoint() {
        let hit = segment_intersection(
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(-1.0, 0.0),
            Vector::new(5.0, 0.0),
        );
        assert_eq!(hit, Some(Vector::new(0.0, 0.0)));
    }

    #[test]
    fn translate_moves_all_points_and_accumulates_delta() {
        let mut boundary = Boundary::new(vec![
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(1.0, 1.0),
        ]);
        boundary.translate(Vector::new(0.5, 0.0));
        boundary.translate(Vector::new(0.0, 0.25));
        assert_eq!(boundary.translation(), Vector::new(0.5, 0.25));
        assert_eq!(boundary.points()[0], Vector::new(0.5, 0.25));
        assert_eq!(boundary.points()[2], Vector::new(1.5, 1.25));
        assert_eq!(boundary.segments().count(), 2);
    }
}
