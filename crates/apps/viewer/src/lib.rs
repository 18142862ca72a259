//! Viewer core: keeps the map surface and the content browser in step with
//! place searches, geolocation and viewport movement.

pub mod cards;
pub mod search;
pub mod viewer;

pub use cards::*;
pub use search::*;
pub use viewer::*;
