use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Builds a coordinate without range checks. Use [`LatLon::checked`] for
    /// values coming from outside the process.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `None` unless both components are finite and in range.
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        let c = Self { lat, lon };
        c.is_valid().then_some(c)
    }

    /// Parses the numeric strings geocoders use for `lat`/`lon`.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        Self::checked(lat, lon)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}
