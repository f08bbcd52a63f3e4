//! Display sink
//!
//! The simulation core does not render. A display provides the initial
//! particle layout at setup and receives the final position array after each
//! step; what it does with them (sprites, meshes, nothing) is its business.

use crate::math::Vector;

pub trait FluidDisplay {
    /// Number of particles the display represents.
    fn particle_count(&self) -> usize;

    /// Initial particle layout, consumed once at setup.
    fn initial_positions(&self) -> Vec<Vector>;

    /// Receive the position array for the step that just completed. The
    /// slice is only valid for the duration of the call.
    fn update_display(&mut self, positions: &[Vector]);
}

/// Headless display that just keeps the latest positions. Used by tests and
/// benches, and useful for hosts that poll instead of being pushed to.
#[derive(Clone, Debug, Default)]
pub struct BufferedDisplay {
    initial: Vec<Vector>,
    positions: Vec<Vector>,
}

impl BufferedDisplay {
    pub fn new(initial: Vec<Vector>) -> Self {
        Self {
            positions: initial.clone(),
            initial,
        }
    }

    pub fn positions(&self) -> &[Vector] {
        &self.positions
    }
}

impl FluidDisplay for BufferedDisplay {
    fn particle_count(&self) -> usize {
        self.initial.len()
    }

    fn initial_positions(&self) -> Vec<Vector> {
        self.initial.clone()
    }

    fn update_display(&mut self, positions: &[Vector]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }
}
