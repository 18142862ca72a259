use browser::{ContentBrowser, Position};
use foundation::LatLon;
use foundation::math::haversine_m;
use nearby::{PointOfInterest, Thumbnail};
use serde::Serialize;

/// One browser card: the focused article plus navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub position: Position,
    pub title: String,
    pub summary: String,
    pub thumbnail: Option<Thumbnail>,
    pub url: String,
    pub coordinate: LatLon,
    /// Meters from the user, when their location is known.
    pub distance_m: Option<f64>,
    pub can_navigate: bool,
}

/// What the browser panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BrowserView {
    NoResults,
    Focused(Card),
}

pub fn card_for(point: &PointOfInterest, position: Position, from: Option<LatLon>) -> Card {
    Card {
        position,
        title: point.title.clone(),
        summary: point.summary.clone(),
        thumbnail: point.thumbnail.clone(),
        url: point.canonical_url.clone(),
        coordinate: point.coordinate,
        distance_m: from.map(|origin| haversine_m(origin, point.coordinate)),
        can_navigate: position.count > 1,
    }
}

pub fn browser_view(browser: &ContentBrowser<PointOfInterest>, from: Option<LatLon>) -> BrowserView {
    match (browser.current(), browser.position()) {
        (Some(point), Some(position)) => BrowserView::Focused(card_for(point, position, from)),
        _ => BrowserView::NoResults,
    }
}

/// Every item as a card, in list order.
pub fn all_cards(browser: &ContentBrowser<PointOfInterest>, from: Option<LatLon>) -> Vec<Card> {
    let count = browser.len();
    browser
        .items()
        .iter()
        .enumerate()
        .map(|(index, point)| card_for(point, Position { index, count }, from))
        .collect()
}

/// `1.2 km`, `850 m`.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1_000.0 {
        format!("{:.1} km", meters / 1_000.0)
    } else {
        format!("{:.0} m", meters)
    }
}
