use browser::ContentBrowser;
use foundation::LatLon;
use geocode::Geocoder;
use layers::{MapSurface, MapWidget, Marker, Overlay, PreviewFragment, TileLayerId, Viewport};
use nearby::{ContentSource, NearbyFetcher, PointOfInterest};
use runtime::{Counter, Counters, RequestSequencer, RequestToken};
use tracing::{debug, info};

use crate::cards::{BrowserView, Card, all_cards, browser_view};
use crate::search::{self, SEARCH_ZOOM, SearchOutcome};

/// Owns all viewer state and reacts to user and device events.
///
/// Nearby fetches are triggered by the first geolocation fix, every
/// viewport move end, a successful place search and "center on me". Each
/// fetch carries a [`RequestToken`]; only the latest one may replace the
/// list, so an older response resolving late is dropped.
pub struct Viewer<G, S, W: MapWidget> {
    geocoder: G,
    fetcher: NearbyFetcher<S>,
    surface: MapSurface<W>,
    browser: ContentBrowser<PointOfInterest>,
    user_location: Option<LatLon>,
    geolocation_done: bool,
    sequencer: RequestSequencer,
    counters: Counters,
}

impl<G, S, W> Viewer<G, S, W>
where
    G: Geocoder,
    S: ContentSource,
    W: MapWidget,
{
    pub fn new(geocoder: G, fetcher: NearbyFetcher<S>, widget: W, viewport: Viewport) -> Self {
        Self {
            geocoder,
            fetcher,
            surface: MapSurface::new(widget, viewport),
            browser: ContentBrowser::new(),
            user_location: None,
            geolocation_done: false,
            sequencer: RequestSequencer::new(),
            counters: Counters::new(),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn fetcher(&self) -> &NearbyFetcher<S> {
        &self.fetcher
    }

    pub fn surface(&self) -> &MapSurface<W> {
        &self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        self.surface.viewport()
    }

    pub fn browser(&self) -> &ContentBrowser<PointOfInterest> {
        &self.browser
    }

    pub fn points(&self) -> &[PointOfInterest] {
        self.browser.items()
    }

    pub fn user_location(&self) -> Option<LatLon> {
        self.user_location
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Place search. On a match the viewport recenters on it at
    /// [`SEARCH_ZOOM`] and nearby content is refreshed there; otherwise
    /// nothing changes.
    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        let outcome = search::resolve(&self.geocoder, query).await;
        match &outcome {
            SearchOutcome::TooShort => self.counters.inc(Counter::SearchSkipped),
            SearchOutcome::NoMatch => {
                self.counters.inc(Counter::SearchDispatched);
                self.counters.inc(Counter::SearchNoMatch);
            }
            SearchOutcome::Failed => {
                self.counters.inc(Counter::SearchDispatched);
                self.counters.inc(Counter::SearchFailed);
            }
            SearchOutcome::Found(result) => {
                self.counters.inc(Counter::SearchDispatched);
                info!(place = %result.display_name, at = %result.coordinate, "recentering on search result");
                self.recenter(result.coordinate, SEARCH_ZOOM);
                self.refresh_nearby(result.coordinate).await;
            }
        }
        outcome
    }

    /// Result of the one-shot geolocation query.
    ///
    /// Only the first call counts; `None` (denied, unsupported) is accepted
    /// silently. Returns `true` when a location was recorded.
    pub async fn on_geolocated(&mut self, fix: Option<LatLon>) -> bool {
        if self.geolocation_done {
            debug!("ignoring repeated geolocation result");
            return false;
        }
        self.geolocation_done = true;

        let Some(location) = fix.filter(LatLon::is_valid) else {
            debug!("geolocation unavailable");
            return false;
        };
        self.user_location = Some(location);
        self.surface
            .replace_markers(Overlay::UserLocation, vec![Marker::user_location(location)]);

        let zoom = self.viewport().zoom;
        self.recenter(location, zoom);
        self.refresh_nearby(location).await;
        true
    }

    /// The widget finished a pan/zoom gesture.
    pub async fn on_move_end(&mut self, center: LatLon, zoom: u8) {
        self.surface.sync_viewport(center, zoom);
        let center = self.viewport().center;
        self.refresh_nearby(center).await;
    }

    /// Recenters on the user's location, if known.
    pub async fn center_on_me(&mut self) -> bool {
        let Some(location) = self.user_location else {
            return false;
        };
        let zoom = self.viewport().zoom;
        self.recenter(location, zoom);
        self.refresh_nearby(location).await;
        true
    }

    pub fn set_active_layer(&mut self, id: TileLayerId) -> bool {
        self.surface.set_active_layer(id)
    }

    /// Fetches content around `center` and applies it if still current.
    pub async fn refresh_nearby(&mut self, center: LatLon) {
        let token = self.begin_nearby();
        let points = self.fetcher.fetch(center).await;
        self.apply_nearby(token, points);
    }

    /// Issues the token for a fetch about to start.
    ///
    /// Hosts that run fetches concurrently call this, spawn
    /// [`NearbyFetcher::fetch`], and hand the result to
    /// [`apply_nearby`](Self::apply_nearby).
    pub fn begin_nearby(&mut self) -> RequestToken {
        self.counters.inc(Counter::NearbyIssued);
        self.sequencer.issue()
    }

    /// Replaces list, cursor and markers with `points`, unless a newer fetch
    /// has been issued since `token`. Returns whether the result was applied.
    pub fn apply_nearby(&mut self, token: RequestToken, points: Vec<PointOfInterest>) -> bool {
        if !self.sequencer.is_current(token) {
            debug!(token = token.0, "discarding stale nearby response");
            self.counters.inc(Counter::NearbyStale);
            return false;
        }

        let markers = points.iter().map(Marker::for_point).collect();
        self.surface.replace_markers(Overlay::PointsOfInterest, markers);
        self.browser.replace(points);
        self.counters.inc(Counter::NearbyApplied);
        debug!(count = self.browser.len(), "nearby content applied");
        true
    }

    pub fn next(&mut self) -> Option<usize> {
        self.browser.next()
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.browser.previous()
    }

    /// Activates the marker of item `index` and focuses it in the browser.
    pub fn select_point(&mut self, index: usize) -> Option<PreviewFragment> {
        if !self.browser.focus(index) {
            return None;
        }
        self.surface
            .select_marker(Overlay::PointsOfInterest, index)
            .cloned()
    }

    pub fn browser_view(&self) -> BrowserView {
        browser_view(&self.browser, self.user_location)
    }

    pub fn cards(&self) -> Vec<Card> {
        all_cards(&self.browser, self.user_location)
    }

    fn recenter(&mut self, center: LatLon, zoom: u8) {
        self.surface.set_center(center, zoom);
        self.counters.inc(Counter::Recentered);
    }
}
