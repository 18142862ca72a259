//! Place-name geocoding.
//!
//! - [`protocol`]: wire types of a Nominatim-compatible `search` response.
//! - [`client`]: the [`Geocoder`] seam and its HTTP implementation, shared by
//!   the proxy (raw passthrough) and the viewer (parsed candidates).

pub mod client;
pub mod error;
pub mod protocol;

pub use client::*;
pub use error::*;
pub use protocol::*;
