//! Particle buffers for the water simulation
//!
//! Flat per-particle arrays owned by the simulation driver. A particle is
//! identified by its index; the index is stable for the lifetime of the
//! simulation.

use crate::math::{Real, Vector};

#[derive(Clone, Debug, Default)]
pub struct ParticleState {
    pub positions: Vec<Vector>,
    /// Position before the current step's integration. Collision sweeps start
    /// from here.
    pub prev_positions: Vec<Vector>,
    pub velocities: Vec<Vector>,
    pub pressures: Vec<Real>,
    pub near_pressures: Vec<Real>,
}

impl ParticleState {
    pub fn from_positions(initial: &[Vector]) -> Self {
        let n = initial.len();
        Self {
            positions: initial.to_vec(),
            prev_positions: initial.to_vec(),
            velocities: vec![Vector::ZERO; n],
            pressures: vec![0.0; n],
            near_pressures: vec![0.0; n],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
