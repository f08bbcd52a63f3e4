//! Boundary collision stage
//!
//! Sweeps each particle's motion segment (previous position, translated by
//! the boundary's own movement, to current position) against every boundary
//! edge, keeps the hit closest to the sweep start, and responds by pushing
//! the particle off the edge and removing its normal velocity component with
//! a slight overcorrection.

use rayon::prelude::*;

use crate::config::constants::{COLLISION_CLEARANCE, COLLISION_OVERCORRECTION, GEOMETRY_EPSILON};
use crate::core::state::ParticleState;
use crate::geometry::boundary::{Boundary, segment_intersection};
use crate::math::{Real, Vector, perpendicular};

struct Hit {
    dist_sq: Real,
    point: Vector,
    edge0: Vector,
    edge1: Vector,
}

pub fn resolve_collisions(state: &mut ParticleState, boundaries: &[Boundary]) {
    if boundaries.is_empty() {
        return;
    }

    let ParticleState {
        positions,
        prev_positions,
        velocities,
        ..
    } = state;

    positions
        .par_iter_mut()
        .zip(prev_positions.par_iter())
        .zip(velocities.par_iter_mut())
        .for_each(|((position, prev), velocity)| {
            resolve_particle(position, *prev, velocity, boundaries);
        });
}

fn resolve_particle(
    position: &mut Vector,
    prev: Vector,
    velocity: &mut Vector,
    boundaries: &[Boundary],
) {
    let mut closest: Option<Hit> = None;

    for boundary in boundaries {
        // The boundary itself may have moved this step; sweep from where the
        // particle was relative to the moved geometry.
        let swept_from = prev + boundary.translation();
        for (edge0, edge1) in boundary.segments() {
            if (edge1 - edge0).length_squared() <= GEOMETRY_EPSILON {
                continue;
            }
            let Some(point) = segment_intersection(edge0, edge1, swept_from, *position) else {
                continue;
            };
            let dist_sq = point.distance_squared(swept_from);
            if closest.as_ref().is_none_or(|hit| dist_sq < hit.dist_sq) {
                closest = Some(Hit {
                    dist_sq,
                    point,
                    edge0,
                    edge1,
                });
            }
        }
    }

    let Some(hit) = closest else {
        return;
    };

    let mut normal = perpendicular(hit.edge1 - hit.edge0);
    // Face the side the particle penetrated to.
    if normal.dot(*position - hit.point) < 0.0 {
        normal = -normal;
    }
    let normal = normal.normalize();

    *position = hit.point - normal * COLLISION_CLEARANCE;
    *velocity -= normal * velocity.dot(normal) * COLLISION_OVERCORRECTION;
}
