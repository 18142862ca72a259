use bytes::Bytes;
use foundation::PageId;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Url;
use tracing::debug;

use crate::error::NearbyError;
use crate::poi::DetailRecord;
use crate::protocol::{parse_discovery, parse_hydration};
use crate::request::{DiscoveryQuery, HydrationQuery, THUMBNAIL_SIZE_PX};

/// English Wikipedia action API.
pub const DEFAULT_WIKI_API: &str = "https://en.wikipedia.org/w/api.php";

/// Trait for geo-indexed content services.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait ContentSource: Send + Sync {
    /// Page ids near `query.center`, in the service's relevance order.
    fn discover(&self, query: DiscoveryQuery) -> BoxFuture<'_, Result<Vec<PageId>, NearbyError>>;

    /// Expands ids into detail records with a single batched request.
    fn hydrate(&self, ids: Vec<PageId>) -> BoxFuture<'_, Result<Vec<DetailRecord>, NearbyError>>;
}

/// MediaWiki-backed content source (Wikipedia and its language editions).
#[derive(Debug, Clone)]
pub struct WikiSource {
    api_url: String,
    origin: String,
    thumbnail_px: u32,
    http: reqwest::Client,
}

impl WikiSource {
    /// `client_id` is sent as `User-Agent`, which the Wikimedia API policy
    /// requires.
    pub fn new(api_url: impl Into<String>, client_id: &str) -> Result<Self, NearbyError> {
        let api_url = api_url.into();
        let parsed = Url::parse(&api_url).map_err(|e| NearbyError::InvalidEndpoint {
            url: api_url.clone(),
            reason: e.to_string(),
        })?;
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(NearbyError::MissingClientId);
        }
        let http = reqwest::Client::builder()
            .user_agent(client_id)
            .build()
            .map_err(NearbyError::Client)?;

        Ok(Self {
            origin: parsed.origin().ascii_serialization(),
            api_url,
            thumbnail_px: THUMBNAIL_SIZE_PX,
            http,
        })
    }

    pub fn with_thumbnail_px(mut self, px: u32) -> Self {
        self.thumbnail_px = px;
        self
    }

    /// Scheme and host of the API, used for fallback article links.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    async fn get(&self, params: &[(&'static str, String)]) -> Result<Bytes, NearbyError> {
        let resp = self.http.get(&self.api_url).query(params).send().await?;
        if !resp.status().is_success() {
            return Err(NearbyError::Status(resp.status()));
        }
        Ok(resp.bytes().await?)
    }
}

impl ContentSource for WikiSource {
    fn discover(&self, query: DiscoveryQuery) -> BoxFuture<'_, Result<Vec<PageId>, NearbyError>> {
        async move {
            debug!(center = %query.center, radius_m = query.radius_m, "geosearch discovery");
            let body = self.get(&query.params()).await?;
            parse_discovery(&body)
        }
        .boxed()
    }

    fn hydrate(&self, ids: Vec<PageId>) -> BoxFuture<'_, Result<Vec<DetailRecord>, NearbyError>> {
        async move {
            debug!(count = ids.len(), "page hydration");
            let mut query = HydrationQuery::new(ids);
            query.thumbnail_px = self.thumbnail_px;
            let body = self.get(&query.params()).await?;
            parse_hydration(&body, &self.origin)
        }
        .boxed()
    }
}
