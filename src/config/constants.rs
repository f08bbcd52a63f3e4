// Physical constants for the water simulation
use bevy::prelude::*;

// Global physics
pub const GRAVITY: Vec2 = Vec2::new(0.0, -8.0);

// Collision response
/// Distance a particle is pushed off a boundary edge after a hit.
pub const COLLISION_CLEARANCE: f32 = 0.02;
/// Scale on the removed normal velocity component. Slightly above 1 so a
/// particle does not re-penetrate the same edge on the next step.
pub const COLLISION_OVERCORRECTION: f32 = 1.2;

// Geometry tolerances
pub const GEOMETRY_EPSILON: f32 = f32::EPSILON;
