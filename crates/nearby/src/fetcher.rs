use foundation::LatLon;
use tracing::{debug, warn};

use crate::error::NearbyError;
use crate::poi::{DetailRecord, PointOfInterest};
use crate::request::{DiscoveryQuery, PAGE_LIMIT};
use crate::source::ContentSource;

/// Runs discovery then hydration against a [`ContentSource`].
#[derive(Debug, Clone)]
pub struct NearbyFetcher<S> {
    source: S,
    limit: u32,
}

impl<S: ContentSource> NearbyFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            limit: PAGE_LIMIT,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Both phases, errors propagated.
    ///
    /// Hydration is only issued once discovery has produced at least one id.
    /// Records lacking a full coordinate are dropped; the rest keep the
    /// hydration response order.
    pub async fn try_fetch(&self, center: LatLon) -> Result<Vec<PointOfInterest>, NearbyError> {
        let query = DiscoveryQuery {
            limit: self.limit,
            ..DiscoveryQuery::new(center)
        };
        let mut ids = self.source.discover(query).await?;
        if ids.is_empty() {
            debug!(%center, "no pages nearby");
            return Ok(Vec::new());
        }
        ids.truncate(self.limit as usize);

        let records = self.source.hydrate(ids).await?;
        let hydrated = records.len();
        let points: Vec<PointOfInterest> = records
            .into_iter()
            .filter_map(DetailRecord::into_point)
            .collect();
        if points.len() < hydrated {
            debug!(
                dropped = hydrated - points.len(),
                "dropped pages without coordinates"
            );
        }
        Ok(points)
    }

    /// Like [`try_fetch`](Self::try_fetch), but any failure becomes an empty
    /// list so stale items are never shown next to a failed refresh.
    pub async fn fetch(&self, center: LatLon) -> Vec<PointOfInterest> {
        match self.try_fetch(center).await {
            Ok(points) => points,
            Err(err) => {
                warn!(%center, "nearby fetch failed: {err}");
                Vec::new()
            }
        }
    }
}
