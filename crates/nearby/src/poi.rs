use foundation::{LatLon, PageId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A hydrated article as the content service returned it.
///
/// Coordinates are optional here: detail records sometimes omit them even
/// when the page came out of a geo-bounded discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub id: PageId,
    pub title: String,
    pub summary: String,
    pub canonical_url: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub thumbnail: Option<Thumbnail>,
}

/// An article that can be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: PageId,
    pub title: String,
    pub summary: String,
    pub canonical_url: String,
    pub coordinate: LatLon,
    pub thumbnail: Option<Thumbnail>,
}

impl DetailRecord {
    /// Both `lat` and `lon` must be present and valid; anything else is
    /// dropped rather than guessed.
    pub fn into_point(self) -> Option<PointOfInterest> {
        let coordinate = LatLon::checked(self.lat?, self.lon?)?;
        Some(PointOfInterest {
            id: self.id,
            title: self.title,
            summary: self.summary,
            canonical_url: self.canonical_url,
            coordinate,
            thumbnail: self.thumbnail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DetailRecord;
    use foundation::{LatLon, PageId};

    fn record(lat: Option<f64>, lon: Option<f64>) -> DetailRecord {
        DetailRecord {
            id: PageId(7),
            title: "Tower Bridge".to_string(),
            summary: "A bridge.".to_string(),
            canonical_url: "https://en.wikipedia.org/wiki/Tower_Bridge".to_string(),
            lat,
            lon,
            thumbnail: None,
        }
    }

    #[test]
    fn both_components_required() {
        assert!(record(None, None).into_point().is_none());
        assert!(record(Some(51.5), None).into_point().is_none());
        assert!(record(None, Some(-0.07)).into_point().is_none());
        assert!(record(Some(123.0), Some(0.0)).into_point().is_none());

        let p = record(Some(51.5055), Some(-0.0754)).into_point().expect("point");
        assert_eq!(p.coordinate, LatLon::new(51.5055, -0.0754));
        assert_eq!(p.id, PageId(7));
    }
}
