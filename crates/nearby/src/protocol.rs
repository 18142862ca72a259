//! MediaWiki action API wire types (`format=json`, format version 1).
//!
//! Discovery: `query.geosearch` is an ordered array of hits.
//! Hydration: `query.pages` is an object keyed by page id. Key order is kept
//! as received (`serde_json` is built with `preserve_order`).
//!
//! The API reports request-level failures as an `error` object inside a
//! `200` body; those are surfaced as [`NearbyError::Api`].

use foundation::PageId;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::NearbyError;
use crate::poi::{DetailRecord, Thumbnail};

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    query: Option<GeoSearchQuery>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchQuery {
    #[serde(default)]
    geosearch: Vec<GeoSearchHit>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchHit {
    pageid: PageId,
}

#[derive(Debug, Deserialize)]
struct PagesResponse {
    #[serde(default)]
    error: Option<ApiError>,
    /// Present when some props (typically extracts) were cut short.
    #[serde(default, rename = "continue")]
    continuation: Option<Map<String, Value>>,
    #[serde(default)]
    query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    pageid: Option<PageId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    thumbnail: Option<PageThumbnail>,
    #[serde(default)]
    coordinates: Vec<PageCoordinate>,
}

#[derive(Debug, Deserialize)]
struct PageThumbnail {
    source: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Deserialize)]
struct PageCoordinate {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl From<ApiError> for NearbyError {
    fn from(err: ApiError) -> Self {
        NearbyError::Api {
            code: err.code,
            info: err.info,
        }
    }
}

/// Page ids from a geosearch response, in upstream order.
pub fn parse_discovery(body: &[u8]) -> Result<Vec<PageId>, NearbyError> {
    let resp: GeoSearchResponse = serde_json::from_slice(body)?;
    if let Some(err) = resp.error {
        return Err(err.into());
    }
    Ok(resp
        .query
        .map(|q| q.geosearch.into_iter().map(|hit| hit.pageid).collect())
        .unwrap_or_default())
}

/// Detail records from a batched page query, in response key order.
///
/// `origin` (e.g. `https://en.wikipedia.org`) builds a `?curid=` link for
/// pages that come back without `fullurl`. Entries without a usable id
/// (missing or invalid pages are keyed by negative numbers) are skipped.
pub fn parse_hydration(body: &[u8], origin: &str) -> Result<Vec<DetailRecord>, NearbyError> {
    let resp: PagesResponse = serde_json::from_slice(body)?;
    if let Some(err) = resp.error {
        return Err(err.into());
    }
    if let Some(continuation) = &resp.continuation {
        let keys: Vec<&str> = continuation.keys().map(String::as_str).collect();
        debug!(?keys, "hydration incomplete, some summaries may be empty");
    }
    let Some(query) = resp.query else {
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(query.pages.len());
    for (key, value) in query.pages {
        let entry: PageEntry = serde_json::from_value(value)?;
        let Some(id) = entry.pageid.or_else(|| key.parse().ok().map(PageId)) else {
            debug!(%key, "skipping page without id");
            continue;
        };

        let (lat, lon) = entry
            .coordinates
            .first()
            .map(|c| (c.lat, c.lon))
            .unwrap_or((None, None));

        records.push(DetailRecord {
            id,
            canonical_url: entry
                .fullurl
                .unwrap_or_else(|| format!("{}/?curid={id}", origin.trim_end_matches('/'))),
            title: entry.title,
            summary: entry.extract.unwrap_or_default(),
            lat,
            lon,
            thumbnail: entry.thumbnail.map(|t| Thumbnail {
                url: t.source,
                width: t.width,
                height: t.height,
            }),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{parse_discovery, parse_hydration};
    use crate::error::NearbyError;
    use crate::poi::Thumbnail;
    use foundation::PageId;
    use pretty_assertions::assert_eq;

    const ORIGIN: &str = "https://en.wikipedia.org";

    #[test]
    fn discovery_keeps_upstream_order() {
        let body = br#"{"batchcomplete":"","query":{"geosearch":[
            {"pageid":736,"ns":0,"title":"A","lat":51.5,"lon":-0.09,"dist":12.3,"primary":""},
            {"pageid":12,"ns":0,"title":"B","lat":51.51,"lon":-0.08,"dist":80.0,"primary":""},
            {"pageid":99,"ns":0,"title":"C","lat":51.49,"lon":-0.1,"dist":900.1,"primary":""}
        ]}}"#;
        assert_eq!(
            parse_discovery(body).expect("parse"),
            vec![PageId(736), PageId(12), PageId(99)]
        );
    }

    #[test]
    fn discovery_without_hits() {
        assert!(parse_discovery(br#"{"batchcomplete":"","query":{"geosearch":[]}}"#)
            .expect("parse")
            .is_empty());
        assert!(parse_discovery(br#"{"batchcomplete":""}"#).expect("parse").is_empty());
    }

    #[test]
    fn api_error_object_is_an_error() {
        let body = br#"{"error":{"code":"invalid-coord","info":"Invalid coordinate provided"}}"#;
        match parse_discovery(body) {
            Err(NearbyError::Api { code, .. }) => assert_eq!(code, "invalid-coord"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_hydration(body, ORIGIN),
            Err(NearbyError::Api { .. })
        ));
    }

    #[test]
    fn hydration_keeps_key_order_and_maps_fields() {
        let body = br#"{"batchcomplete":"","query":{"pages":{
            "99":{"pageid":99,"ns":0,"title":"Tower of London","extract":"A castle.",
                  "fullurl":"https://en.wikipedia.org/wiki/Tower_of_London",
                  "thumbnail":{"source":"https://upload.wikimedia.org/t.jpg","width":320,"height":240},
                  "coordinates":[{"lat":51.5081,"lon":-0.0759,"primary":"","globe":"earth"}]},
            "12":{"pageid":12,"ns":0,"title":"No Coords","extract":"x"},
            "736":{"pageid":736,"ns":0,"title":"No Url",
                   "coordinates":[{"lat":51.5,"lon":-0.09}]}
        }}}"#;
        let records = parse_hydration(body, ORIGIN).expect("parse");
        let ids: Vec<PageId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![PageId(99), PageId(12), PageId(736)]);

        let tower = &records[0];
        assert_eq!(tower.summary, "A castle.");
        assert_eq!((tower.lat, tower.lon), (Some(51.5081), Some(-0.0759)));
        assert_eq!(
            tower.thumbnail,
            Some(Thumbnail {
                url: "https://upload.wikimedia.org/t.jpg".to_string(),
                width: 320,
                height: 240,
            })
        );

        assert_eq!((records[1].lat, records[1].lon), (None, None));
        assert_eq!(records[2].summary, "");
        assert_eq!(records[2].canonical_url, "https://en.wikipedia.org/?curid=736");
    }

    #[test]
    fn hydration_with_continuation_keeps_partial_records() {
        let body = br#"{"continue":{"excontinue":1,"continue":"||pageimages|info|coordinates"},
            "query":{"pages":{
                "5":{"pageid":5,"title":"With Extract","extract":"Text.",
                     "coordinates":[{"lat":51.5,"lon":-0.1}]},
                "3":{"pageid":3,"title":"Past Extract Limit",
                     "coordinates":[{"lat":51.6,"lon":-0.2}]}
            }}}"#;
        let records = parse_hydration(body, ORIGIN).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].summary, "Text.");
        assert_eq!(records[1].id, PageId(3));
        assert_eq!(records[1].summary, "");
        assert_eq!((records[1].lat, records[1].lon), (Some(51.6), Some(-0.2)));
    }

    #[test]
    fn hydration_skips_missing_pages() {
        let body = br#"{"query":{"pages":{"-1":{"ns":0,"title":"Gone","missing":""}}}}"#;
        assert!(parse_hydration(body, ORIGIN).expect("parse").is_empty());
    }

    #[test]
    fn hydration_garbage_is_decode_error() {
        assert!(matches!(
            parse_hydration(b"<html>", ORIGIN),
            Err(NearbyError::Decode(_))
        ));
    }
}
