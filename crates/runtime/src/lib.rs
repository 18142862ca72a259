pub mod counters;
pub mod sequence;

pub use counters::*;
pub use sequence::*;
