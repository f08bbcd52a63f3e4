pub mod boundary;
pub mod force_zone;

pub use boundary::{Boundary, segment_intersection, segments_intersect};
pub use force_zone::ForceZone;
