pub mod collision;
pub mod force_field;
pub mod integrate;
pub mod pressure;

pub use collision::resolve_collisions;
pub use force_field::apply_force_zones;
pub use integrate::integrate;
pub use pressure::{apply_relaxation, update_pressures};
