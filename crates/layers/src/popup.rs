use foundation::LatLon;
use nearby::{PointOfInterest, Thumbnail};
use serde::Serialize;

/// Longest summary a preview shows, ellipsis included.
pub const PREVIEW_SUMMARY_CHARS: usize = 160;

/// Compact preview anchored to a marker: plain data, no toolkit types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewFragment {
    pub anchor: LatLon,
    pub title: String,
    pub thumbnail: Option<Thumbnail>,
    pub summary: String,
    pub url: String,
}

impl PreviewFragment {
    pub fn new(
        anchor: LatLon,
        title: impl Into<String>,
        summary: &str,
        thumbnail: Option<Thumbnail>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            anchor,
            title: title.into(),
            thumbnail,
            summary: truncate_summary(summary, PREVIEW_SUMMARY_CHARS),
            url: url.into(),
        }
    }

    pub fn for_point(point: &PointOfInterest) -> Self {
        Self::new(
            point.coordinate,
            point.title.clone(),
            &point.summary,
            point.thumbnail.clone(),
            point.canonical_url.clone(),
        )
    }
}

/// Cuts `text` to at most `max_chars` characters, ending in `…` when cut.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}
