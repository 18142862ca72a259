use foundation::LatLon;
use nearby::PointOfInterest;
use serde::Serialize;

use crate::popup::PreviewFragment;
use crate::symbology::MarkerStyle;

/// Marker overlays drawn above the tile layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    PointsOfInterest,
    UserLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinate: LatLon,
    pub style: MarkerStyle,
    /// Shown when the marker is selected; `None` for inert markers.
    pub on_select: Option<PreviewFragment>,
}

impl Marker {
    pub fn for_point(point: &PointOfInterest) -> Self {
        Self {
            coordinate: point.coordinate,
            style: MarkerStyle::POINT_OF_INTEREST,
            on_select: Some(PreviewFragment::for_point(point)),
        }
    }

    pub fn user_location(coordinate: LatLon) -> Self {
        Self {
            coordinate,
            style: MarkerStyle::USER_LOCATION,
            on_select: None,
        }
    }
}
