use geocode::{Geocoder, SearchResult};
use serde::Serialize;
use tracing::{debug, warn};

/// Queries shorter than this are never sent upstream.
pub const MIN_QUERY_CHARS: usize = 3;
/// Zoom applied when recentering on a search result.
pub const SEARCH_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Input too short; nothing was sent.
    TooShort,
    /// The geocoder answered but had no usable match.
    NoMatch,
    /// The geocoder could not be reached or answered garbage.
    Failed,
    Found(SearchResult),
}

/// Length gate applied before any network traffic.
pub fn should_dispatch(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Resolves `query` to its authoritative match: the geocoder's first result.
///
/// Never errors; failures are logged and reported as an outcome.
pub async fn resolve<G: Geocoder + ?Sized>(geocoder: &G, query: &str) -> SearchOutcome {
    if !should_dispatch(query) {
        debug!(query, "search skipped: query too short");
        return SearchOutcome::TooShort;
    }

    let query = query.trim();
    let candidates = match geocoder.search(query).await {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!(query, "place search failed: {err}");
            return SearchOutcome::Failed;
        }
    };

    let Some(first) = candidates.first() else {
        debug!(query, "place search: no match");
        return SearchOutcome::NoMatch;
    };
    match first.to_search_result() {
        Some(result) => SearchOutcome::Found(result),
        None => {
            warn!(query, lat = %first.lat, lon = %first.lon, "first match has unusable coordinates");
            SearchOutcome::NoMatch
        }
    }
}
