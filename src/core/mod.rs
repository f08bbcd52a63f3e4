pub mod grid;
pub mod sim_state;
pub mod state;

pub use grid::{CELL_CAPACITY, GridInfo, SpatialGrid};
pub use sim_state::FluidState;
pub use state::ParticleState;
