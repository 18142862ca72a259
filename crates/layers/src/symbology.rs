use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Pin,
    Dot,
}

/// How a marker is drawn. Colors are RGBA in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: [f32; 4],
    pub radius_px: f32,
}

impl MarkerStyle {
    pub const fn new(shape: MarkerShape, color: [f32; 4], radius_px: f32) -> Self {
        Self {
            shape,
            color,
            radius_px,
        }
    }

    /// Article markers.
    pub const POINT_OF_INTEREST: MarkerStyle =
        MarkerStyle::new(MarkerShape::Pin, [0.16, 0.45, 0.86, 1.0], 12.0);

    /// The "you are here" dot.
    pub const USER_LOCATION: MarkerStyle =
        MarkerStyle::new(MarkerShape::Dot, [0.90, 0.22, 0.21, 1.0], 8.0);
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::POINT_OF_INTEREST
    }
}
