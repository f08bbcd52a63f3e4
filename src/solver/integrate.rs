//! Integration stage
//!
//! Saves the previous position, applies gravity and optional quadratic
//! damping, enforces the floor containment law, and advances positions.
//! Each particle touches only its own buffers, so the sweep runs in
//! parallel.

use rayon::prelude::*;

use crate::core::state::ParticleState;
use crate::math::{Real, Vector};

pub fn integrate(state: &mut ParticleState, gravity: Vector, damping: Real, dt: Real) {
    let ParticleState {
        positions,
        prev_positions,
        velocities,
        ..
    } = state;

    positions
        .par_iter_mut()
        .zip(prev_positions.par_iter_mut())
        .zip(velocities.par_iter_mut())
        .for_each(|((position, prev), velocity)| {
            *prev = *position;

            *velocity += gravity * dt;
            if damping > 0.0 {
                *velocity -= *velocity * velocity.length() * damping * dt;
            }

            // Floor containment: a particle that starts the step below y=0
            // gets exactly the vertical velocity that returns it to y=0 by
            // the end of the step.
            if position.y < 0.0 {
                velocity.y = -position.y / dt;
            }

            *position += *velocity * dt;
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: Real = 0.02;

    #[test]
    fn free_fall_matches_semi_implicit_euler() {
        // Single particle at rest at y=5 under gravity (0,-8): after one
        // step of dt=0.02 the velocity is -0.16 and the position dropped by
        // velocity*dt = 0.0032.
        let mut state = ParticleState::from_positions(&[Vector::new(0.0, 5.0)]);
        let gravity = Vector::new(0.0, -8.0);

        integrate(&mut state, gravity, 0.0, DT);

        assert_eq!(state.velocities[0].y, gravity.y * DT);
        assert_eq!(state.positions[0].y, 5.0 + gravity.y * DT * DT);
        assert!((state.velocities[0].y + 0.16).abs() < 1e-6);
        assert!((state.positions[0].y - (5.0 - 0.0032)).abs() < 1e-6);
        assert_eq!(state.prev_positions[0], Vector::new(0.0, 5.0));
    }

    #[test]
    fn floor_containment_returns_particle_to_zero() {
        let mut state = ParticleState::from_positions(&[Vector::new(1.0, -0.1)]);
        state.velocities[0] = Vector::new(0.5, -3.0);

        integrate(&mut state, Vector::new(0.0, -8.0), 0.0, DT);

        assert!(state.positions[0].y.abs() < 1e-6);
        // Horizontal motion is unaffected by the floor clause.
        assert!((state.positions[0].x - (1.0 + 0.5 * DT)).abs() < 1e-6);
    }

    #[test]
    fn quadratic_damping_slows_fast_particles() {
        let mut state = ParticleState::from_positions(&[Vector::new(0.0, 5.0)]);
        state.velocities[0] = Vector::new(10.0, 0.0);

        integrate(&mut state, Vector::ZERO, 0.2, DT);

        let speed = state.velocities[0].length();
        assert!(speed < 10.0);
        assert!(speed > 0.0);
        // Damping only scales, never flips, the velocity.
        assert!(state.velocities[0].x > 0.0);
    }
}
