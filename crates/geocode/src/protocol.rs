//! Wire types for a Nominatim-compatible `/search?format=json` response.
//!
//! The response is a JSON array of candidates ordered by the geocoder's own
//! ranking. Only `lat`, `lon` and `display_name` are interpreted; everything
//! else is kept in `extra` so a passthrough stays lossless.

use foundation::LatLon;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::GeocodeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Decimal degrees. Nominatim sends strings; numbers are accepted too.
    #[serde(deserialize_with = "string_or_number")]
    pub lat: String,
    #[serde(deserialize_with = "string_or_number")]
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A resolved place, used once to recenter the viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub display_name: String,
    pub coordinate: LatLon,
}

impl GeocodeCandidate {
    /// `None` when the coordinate strings do not parse or are out of range.
    pub fn to_search_result(&self) -> Option<SearchResult> {
        let coordinate = LatLon::parse(&self.lat, &self.lon)?;
        Some(SearchResult {
            display_name: self.display_name.clone(),
            coordinate,
        })
    }
}

pub fn parse_candidates(body: &[u8]) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    Ok(serde_json::from_slice(body)?)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected coordinate string, got {other}"
        ))),
    }
}
