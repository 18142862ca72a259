//! Nearby-content fetching.
//!
//! Two phases against the content service:
//! - discovery: page ids within a radius of a coordinate, in upstream order;
//! - hydration: one batched detail request expanding those ids into
//!   displayable records.
//!
//! [`NearbyFetcher`] runs both phases and never surfaces an error to its
//! caller: any failure degrades to an empty list.

pub mod error;
pub mod fetcher;
pub mod poi;
pub mod protocol;
pub mod request;
pub mod source;

pub use error::*;
pub use fetcher::*;
pub use poi::*;
pub use request::*;
pub use source::*;
