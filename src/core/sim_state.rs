//! Aggregate simulation state and the per-step pipeline.

use bevy::log::info;
use bevy::prelude::Resource;

use crate::config::SimParams;
use crate::display::FluidDisplay;
use crate::geometry::boundary::Boundary;
use crate::geometry::force_zone::ForceZone;
use crate::math::{Real, Vector};
use crate::solver::{
    apply_force_zones, apply_relaxation, integrate, resolve_collisions, update_pressures,
};

use super::grid::{GridInfo, SpatialGrid};
use super::state::ParticleState;

/// Owns every buffer the simulation touches: particle state, the neighbor
/// grid, the boundary geometry snapshot, and the force zones. One `step`
/// runs the fixed five-stage pipeline; stages never overlap.
#[derive(Resource)]
pub struct FluidState {
    params: SimParams,
    grid: SpatialGrid,
    particles: Option<ParticleState>,
    boundaries: Vec<Boundary>,
    zones: Vec<ForceZone>,
}

impl FluidState {
    pub fn new(
        params: SimParams,
        initial_positions: &[Vector],
        boundaries: Vec<Boundary>,
        zones: Vec<ForceZone>,
    ) -> Self {
        let info = GridInfo::new(params.domain_half_extent, params.interaction_radius);
        info!(
            "fluid setup: {} particles, {}x{} grid cells, {} boundaries, {} force zones",
            initial_positions.len(),
            info.x_cells,
            info.y_cells,
            boundaries.len(),
            zones.len(),
        );
        Self {
            grid: SpatialGrid::new(info),
            particles: Some(ParticleState::from_positions(initial_positions)),
            params,
            boundaries,
            zones,
        }
    }

    /// Setup from a display sink, which owns the initial layout.
    pub fn from_display(
        params: SimParams,
        display: &impl FluidDisplay,
        boundaries: Vec<Boundary>,
        zones: Vec<ForceZone>,
    ) -> Self {
        Self::new(params, &display.initial_positions(), boundaries, zones)
    }

    /// Run the pipeline once: integrate, rebuild the grid, density pass,
    /// relaxation pass, boundary collision, force zones. Returns the final
    /// positions for this step.
    ///
    /// Panics if the state has been torn down.
    pub fn step(&mut self, dt: Real) -> &[Vector] {
        let Some(particles) = self.particles.as_mut() else {
            panic!("FluidState::step called after teardown");
        };

        integrate(particles, self.params.gravity, self.params.damping, dt);

        self.grid.rebuild(&particles.positions);

        update_pressures(particles, &self.grid, &self.params);
        apply_relaxation(particles, &self.grid, &self.params, dt);

        resolve_collisions(particles, &self.boundaries);

        apply_force_zones(
            particles,
            &self.zones,
            &self.boundaries,
            self.params.fan_strength,
            dt,
        );

        // Boundary movement deltas are consumed; next step starts fresh.
        for boundary in &mut self.boundaries {
            boundary.clear_translation();
        }

        &self.particles.as_ref().unwrap().positions
    }

    /// Step and push the result into a display sink.
    pub fn step_into(&mut self, dt: Real, display: &mut impl FluidDisplay) {
        let positions = self.step(dt);
        display.update_display(positions);
    }

    /// Release all particle buffers. Idempotent; stepping afterwards panics.
    pub fn teardown(&mut self) {
        self.particles = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.particles.is_none()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.as_ref().map_or(0, ParticleState::len)
    }

    /// Final positions of the last completed step.
    pub fn positions(&self) -> &[Vector] {
        self.particles
            .as_ref()
            .map_or(&[], |particles| &particles.positions)
    }

    pub fn velocities(&self) -> &[Vector] {
        self.particles
            .as_ref()
            .map_or(&[], |particles| &particles.velocities)
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn grid_info(&self) -> &GridInfo {
        self.grid.info()
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Move one boundary before the next step; the delta feeds the collision
    /// sweep.
    pub fn translate_boundary(&mut self, index: usize, delta: Vector) {
        if let Some(boundary) = self.boundaries.get_mut(index) {
            boundary.translate(delta);
        }
    }

    pub fn zones(&self) -> &[ForceZone] {
        &self.zones
    }
}
