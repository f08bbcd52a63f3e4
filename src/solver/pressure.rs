//! Double-density relaxation
//!
//! Two passes over grid-filtered neighbors (Clavet et al.): a density pass
//! that accumulates quadratic density and cubic near-density into per
//! particle pressures, then a relaxation pass that directly displaces
//! positions toward the target density.

use rayon::prelude::*;

use crate::config::SimParams;
use crate::core::grid::SpatialGrid;
use crate::core::state::ParticleState;
use crate::math::Real;

/// Density pass. Writes only the particle's own pressure pair, so the sweep
/// runs in parallel against a read-only position buffer.
pub fn update_pressures(state: &mut ParticleState, grid: &SpatialGrid, params: &SimParams) {
    let radius = params.interaction_radius;
    let radius_sq = params.interaction_radius_sq();

    let ParticleState {
        positions,
        pressures,
        near_pressures,
        ..
    } = state;
    let positions = &*positions;

    pressures
        .par_iter_mut()
        .zip(near_pressures.par_iter_mut())
        .enumerate()
        .for_each(|(i, (pressure, near_pressure))| {
            let position = positions[i];
            let mut density = 0.0;
            let mut near_density = 0.0;

            grid.for_each_candidate(position, |j| {
                if i == j {
                    return;
                }
                let dist_sq = positions[j].distance_squared(position);
                if dist_sq > radius_sq {
                    return;
                }
                let g = 1.0 - dist_sq.sqrt() / radius;
                density += g * g;
                near_density += g * g * g;
            });

            *pressure = params.stiffness * (density - params.rest_density);
            *near_pressure = params.stiffness_near * near_density;
        });
}

/// Relaxation pass. Every particle scans its neighbors and applies the
/// symmetric half-displacement to both sides of each pair, so each unordered
/// pair is corrected once from each end. The pass runs serially: it is a
/// read-modify-write over neighboring positions and the stage barrier is the
/// only ordering guarantee the pipeline gives.
pub fn apply_relaxation(state: &mut ParticleState, grid: &SpatialGrid, params: &SimParams, dt: Real) {
    let radius = params.interaction_radius;
    let radius_sq = params.interaction_radius_sq();
    let dt_sq = dt * dt;

    let ParticleState {
        positions,
        pressures,
        near_pressures,
        ..
    } = state;

    for i in 0..positions.len() {
        let position = positions[i];
        let pressure = pressures[i];
        let near_pressure = near_pressures[i];

        grid.for_each_candidate(position, |j| {
            if i == j {
                return;
            }
            let neighbor = positions[j];
            let dist_sq = neighbor.distance_squared(position);
            // Zero-distance pairs are skipped: no self-force, no divide by
            // zero.
            if dist_sq > radius_sq || dist_sq == 0.0 {
                return;
            }

            let g = 1.0 - dist_sq.sqrt() / radius;
            let magnitude = pressure * g + near_pressure * g * g;
            let displacement = (neighbor - position).normalize() * magnitude * dt_sq;

            positions[i] -= displacement * 0.5;
            positions[j] += displacement * 0.5;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::GridInfo;
    use crate::math::Vector;

    fn params() -> SimParams {
        SimParams {
            interaction_radius: 1.0,
            stiffness: 1.0,
            stiffness_near: 1.0,
            rest_density: 0.0,
            ..SimParams::default()
        }
    }

    fn grid_for(state: &ParticleState, params: &SimParams) -> SpatialGrid {
        let info = GridInfo::new(params.domain_half_extent, params.interaction_radius);
        let mut grid = SpatialGrid::new(info);
        grid.rebuild(&state.positions);
        grid
    }

    #[test]
    fn density_contributions_are_symmetric() {
        // Two particles exactly at distance r < interaction_radius see the
        // same g and therefore identical pressures.
        let params = params();
        let mut state = ParticleState::from_positions(&[
            Vector::new(0.0, 2.0),
            Vector::new(0.7, 2.0),
        ]);
        let grid = grid_for(&state, &params);

        update_pressures(&mut state, &grid, &params);

        assert_eq!(state.pressures[0], state.pressures[1]);
        assert_eq!(state.near_pressures[0], state.near_pressures[1]);
    }

    #[test]
    fn close_pair_is_repulsive_and_separates() {
        // Distance 0.5*r with rest_density 0: both pressures positive, and
        // one relaxation step pushes the pair apart.
        let params = params();
        let mut state = ParticleState::from_positions(&[
            Vector::new(0.0, 2.0),
            Vector::new(0.5, 2.0),
        ]);
        let grid = grid_for(&state, &params);

        update_pressures(&mut state, &grid, &params);
        assert!(state.pressures[0] > 0.0);
        assert!(state.pressures[1] > 0.0);

        let before = state.positions[0].distance(state.positions[1]);
        apply_relaxation(&mut state, &grid, &params, 0.02);
        let after = state.positions[0].distance(state.positions[1]);
        assert!(after > before);
    }

    #[test]
    fn particles_outside_the_radius_do_not_interact() {
        let params = params();
        let mut state = ParticleState::from_positions(&[
            Vector::new(0.0, 2.0),
            Vector::new(1.5, 2.0),
        ]);
        let grid = grid_for(&state, &params);

        update_pressures(&mut state, &grid, &params);

        // No neighbors in range: density is zero, pressure collapses to
        // -stiffness * rest_density (zero here).
        assert_eq!(state.pressures[0], 0.0);
        assert_eq!(state.near_pressures[0], 0.0);
    }

    #[test]
    fn coincident_pair_is_skipped_without_nans() {
        let params = params();
        let mut state = ParticleState::from_positions(&[
            Vector::new(0.0, 2.0),
            Vector::new(0.0, 2.0),
        ]);
        let grid = grid_for(&state, &params);

        update_pressures(&mut state, &grid, &params);
        apply_relaxation(&mut state, &grid, &params, 0.02);

        assert!(state.positions[0].is_finite());
        assert!(state.positions[1].is_finite());
        assert_eq!(state.positions[0], state.positions[1]);
    }
}
