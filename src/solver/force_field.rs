//! Force zone stage
//!
//! Particles inside a zone get a velocity impulse along the zone's push
//! direction, unless solid geometry occludes the single ray cast from the
//! particle's previous position back toward the side the air enters from.

use rayon::prelude::*;

use crate::core::state::ParticleState;
use crate::geometry::boundary::{Boundary, segments_intersect};
use crate::geometry::force_zone::ForceZone;
use crate::math::{Real, Vector};

pub fn apply_force_zones(
    state: &mut ParticleState,
    zones: &[ForceZone],
    boundaries: &[Boundary],
    strength: Real,
    dt: Real,
) {
    if zones.is_empty() {
        return;
    }

    let ParticleState {
        positions,
        prev_positions,
        velocities,
        ..
    } = state;
    let positions = &*positions;

    velocities
        .par_iter_mut()
        .zip(positions.par_iter())
        .zip(prev_positions.par_iter())
        .for_each(|((velocity, position), prev)| {
            for zone in zones {
                if !zone.contains(*position) {
                    continue;
                }
                if !occluded(zone, *position, *prev, boundaries) {
                    *velocity += zone.direction * strength * dt;
                }
            }
        });
}

/// True when any boundary segment blocks the ray from the particle's
/// previous position back toward the zone's entry side. One ray per zone;
/// this is a get-out-of-the-way check, not a shadow computation.
fn occluded(zone: &ForceZone, position: Vector, prev: Vector, boundaries: &[Boundary]) -> bool {
    let exit = zone.exit_point(prev);
    let reach = position.distance(exit);
    let ray_end = prev - zone.direction * reach;

    boundaries.iter().any(|boundary| {
        boundary
            .segments()
            .any(|(edge0, edge1)| segments_intersect(edge0, edge1, prev, ray_end))
    })
}
