use bevy::prelude::*;

use crate::config::constants::GRAVITY;
use crate::math::{Real, Vector};

/// Parameters controlling the water simulation behavior.
#[derive(Resource, Clone, Debug)]
pub struct SimParams {
    /// Maximum distance at which two particles affect each other's pressure.
    /// Also the side length of a neighbor-search grid cell.
    pub interaction_radius: Real,

    /// Gravity acceleration applied every step.
    pub gravity: Vector,

    /// Pressure stiffness. Scales how strongly the fluid resists deviating
    /// from `rest_density`.
    pub stiffness: Real,

    /// Near-pressure stiffness. Scales the short-range cubic repulsion term
    /// that keeps particles from clumping.
    pub stiffness_near: Real,

    /// Target density for the quadratic pressure term.
    pub rest_density: Real,

    /// Quadratic velocity damping. Zero disables it.
    pub damping: Real,

    /// Velocity impulse per second applied inside an unobstructed force zone.
    pub fan_strength: Real,

    /// Half extents of the simulated domain. The neighbor grid covers
    /// `[-half, half]` on each axis; positions outside are clamped into the
    /// nearest edge cell for indexing.
    pub domain_half_extent: Vector,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            interaction_radius: 1.0,
            gravity: GRAVITY,
            stiffness: 1.0,
            stiffness_near: 2.0,
            rest_density: 4.0,
            damping: 0.0,
            fan_strength: 10.0,
            domain_half_extent: Vector::new(16.0, 9.0),
        }
    }
}

impl SimParams {
    pub fn with_gravity(mut self, gravity: Vector) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_interaction_radius(mut self, radius: Real) -> Self {
        self.interaction_radius = radius;
        self
    }

    pub fn with_pressure(mut self, stiffness: Real, stiffness_near: Real, rest_density: Real) -> Self {
        self.stiffness = stiffness;
        self.stiffness_near = stiffness_near;
        self.rest_density = rest_density;
        self
    }

    pub fn with_damping(mut self, damping: Real) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_domain(mut self, half_extent: Vector) -> Self {
        self.domain_half_extent = half_extent;
        self
    }

    #[inline(always)]
    pub fn interaction_radius_sq(&self) -> Real {
        self.interaction_radius * self.interaction_radius
    }
}
