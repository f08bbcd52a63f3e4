use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod display;
pub mod geometry;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{SimParams, constants::GRAVITY};
pub use crate::core::{FluidState, GridInfo, ParticleState, SpatialGrid};
pub use crate::display::{BufferedDisplay, FluidDisplay};
pub use crate::geometry::{Boundary, ForceZone};

pub struct FluidPlugin;

impl Plugin for FluidPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimParams>().add_systems(
            FixedUpdate,
            step_simulation.run_if(resource_exists::<FluidState>),
        );
    }
}

/// Advance the simulation one fixed tick. The host spawns the `FluidState`
/// resource (geometry snapshot included) and reads positions back out of it.
fn step_simulation(time: Res<Time>, mut state: ResMut<FluidState>) {
    state.step(time.delta_secs());
}
