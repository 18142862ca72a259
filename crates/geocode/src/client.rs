use bytes::Bytes;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::GeocodeError;
use crate::protocol::{GeocodeCandidate, parse_candidates};

/// Public Nominatim search endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves free text into ranked place candidates.
///
/// Methods return boxed futures so the trait stays dyn-compatible.
pub trait Geocoder: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<GeocodeCandidate>, GeocodeError>>;
}

/// HTTP geocoder speaking the `?format=json&q=` dialect.
///
/// Points either at the upstream service directly or at the proxy's
/// `/search` route, which accepts the same parameters.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GeocodeClient {
    /// `client_id` is sent as `User-Agent`; upstream geocoders reject
    /// anonymous traffic, so an empty identifier is refused here.
    pub fn new(endpoint: impl Into<String>, client_id: &str) -> Result<Self, GeocodeError> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(GeocodeError::MissingClientId);
        }
        let http = reqwest::Client::builder()
            .user_agent(client_id)
            .build()
            .map_err(GeocodeError::Client)?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Issues the request and returns the successful body untouched.
    pub async fn fetch_raw(&self, query: &str) -> Result<Bytes, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        debug!(endpoint = %self.endpoint, query, "geocode request");
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status(resp.status()));
        }
        Ok(resp.bytes().await?)
    }
}

impl Geocoder for GeocodeClient {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<GeocodeCandidate>, GeocodeError>> {
        async move {
            let body = self.fetch_raw(query).await?;
            parse_candidates(&body)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::{GeocodeClient, Geocoder};
    use crate::error::GeocodeError;

    // Nothing listens on the discard port; a request would fail with Transport.
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/search";

    #[test]
    fn blank_client_id_is_refused() {
        let err = GeocodeClient::new(DEAD_ENDPOINT, "   ").unwrap_err();
        assert!(matches!(err, GeocodeError::MissingClientId));
    }

    #[tokio::test]
    async fn empty_query_never_reaches_the_network() {
        let client = GeocodeClient::new(DEAD_ENDPOINT, "atlas-test/0.1").expect("client");
        let err = client.search("  \t ").await.unwrap_err();
        assert!(matches!(err, GeocodeError::EmptyQuery));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        let client = GeocodeClient::new(DEAD_ENDPOINT, "atlas-test/0.1").expect("client");
        let err = client.fetch_raw("Paris").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Transport(_)));
    }
}
