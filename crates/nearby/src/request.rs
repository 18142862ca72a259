use foundation::{LatLon, PageId};

/// Discovery radius around the query center.
pub const SEARCH_RADIUS_M: u32 = 10_000;
/// Maximum number of pages a single discovery may return.
///
/// TextExtracts serves at most 20 intro extracts per request, so in a full
/// batch the remaining pages come back without a summary and the response
/// carries a `continue` block, which is not followed.
pub const PAGE_LIMIT: u32 = 50;
/// Thumbnail edge requested during hydration, in pixels.
pub const THUMBNAIL_SIZE_PX: u32 = 320;

/// The MediaWiki geosearch accepts radii in [10, 10000] meters.
const MIN_RADIUS_M: u32 = 10;
const MAX_RADIUS_M: u32 = 10_000;

/// Phase one: which pages lie within `radius_m` of `center`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiscoveryQuery {
    pub center: LatLon,
    pub radius_m: u32,
    pub limit: u32,
}

impl DiscoveryQuery {
    pub fn new(center: LatLon) -> Self {
        Self {
            center,
            radius_m: SEARCH_RADIUS_M,
            limit: PAGE_LIMIT,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", "query".to_string()),
            ("list", "geosearch".to_string()),
            (
                "gscoord",
                format!("{}|{}", self.center.lat, self.center.lon),
            ),
            (
                "gsradius",
                self.radius_m.clamp(MIN_RADIUS_M, MAX_RADIUS_M).to_string(),
            ),
            ("gslimit", self.limit.max(1).to_string()),
            ("format", "json".to_string()),
        ]
    }
}

/// Phase two: one batched detail request for every discovered page.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrationQuery {
    pub ids: Vec<PageId>,
    pub thumbnail_px: u32,
}

impl HydrationQuery {
    pub fn new(ids: Vec<PageId>) -> Self {
        Self {
            ids,
            thumbnail_px: THUMBNAIL_SIZE_PX,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let ids = self
            .ids
            .iter()
            .map(PageId::to_string)
            .collect::<Vec<_>>()
            .join("|");
        vec![
            ("action", "query".to_string()),
            ("pageids", ids),
            (
                "prop",
                "extracts|pageimages|info|coordinates".to_string(),
            ),
            ("exintro", "1".to_string()),
            ("explaintext", "1".to_string()),
            ("exlimit", "max".to_string()),
            ("piprop", "thumbnail".to_string()),
            ("pithumbsize", self.thumbnail_px.to_string()),
            ("pilimit", "max".to_string()),
            ("inprop", "url".to_string()),
            ("colimit", "max".to_string()),
            ("format", "json".to_string()),
        ]
    }
}
