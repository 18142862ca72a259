pub mod coord;
pub mod ids;
pub mod math;

// Coordinates and identifiers shared by every crate.
pub use coord::*;
pub use ids::*;
