//! `GET /search?q=` passthrough to the upstream geocoder.
//!
//! Browsers cannot call most geocoders directly (CORS, required client
//! identification), so this route forwards the query and hands back the
//! upstream JSON untouched.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use geocode::GeocodeClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<GeocodeClient>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/search", get(search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(query) = params.q.filter(|q| !q.trim().is_empty()) else {
        return api_error(StatusCode::BAD_REQUEST, "missing query parameter q").into_response();
    };

    debug!(query = %query, "forwarding geocode request");
    match state.geocoder.fetch_raw(&query).await {
        Ok(body) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            (StatusCode::OK, headers, Body::from(body)).into_response()
        }
        Err(err) => {
            error!(query = %query, "geocode upstream failed: {err}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "geocoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::Router;
    use geocode::GeocodeClient;
    use serde_json::Value;

    use super::{router, AppState};

    const PARIS: &str = r#"[{"place_id":1,"lat":"48.8566","lon":"2.3522","display_name":"Paris, France"}]"#;
    const USER_AGENT: &str = "atlas-proxy-test/0.1";

    #[derive(Clone, Default)]
    struct Upstream {
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Option<(HashMap<String, String>, Option<String>)>>>,
        fail_with: Option<StatusCode>,
    }

    async fn upstream_search(
        State(up): State<Upstream>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Response {
        up.calls.fetch_add(1, Ordering::SeqCst);
        let agent = headers
            .get(http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *up.seen.lock().unwrap() = Some((params, agent));
        match up.fail_with {
            Some(status) => (status, "upstream detail: database on fire").into_response(),
            None => (StatusCode::OK, PARIS).into_response(),
        }
    }

    async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn spawn_proxy(upstream_url: String) -> SocketAddr {
        let geocoder = GeocodeClient::new(upstream_url, USER_AGENT).unwrap();
        spawn(router(AppState {
            geocoder: Arc::new(geocoder),
        }))
        .await
    }

    async fn spawn_pair(upstream: Upstream) -> SocketAddr {
        let up_addr = spawn(
            Router::new()
                .route("/search", get(upstream_search))
                .with_state(upstream),
        )
        .await;
        spawn_proxy(format!("http://{up_addr}/search")).await
    }

    async fn get_json(url: String) -> (StatusCode, Value) {
        let resp = reqwest::get(url).await.unwrap();
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
        let body = resp.json::<Value>().await.unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn missing_query_is_rejected_without_upstream_call() {
        let upstream = Upstream::default();
        let proxy = spawn_pair(upstream.clone()).await;

        for path in ["/search", "/search?q=", "/search?q=%20%20"] {
            let (status, body) = get_json(format!("http://{proxy}{path}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert!(body["error"].is_string());
        }
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_passes_body_through_verbatim() {
        let upstream = Upstream::default();
        let proxy = spawn_pair(upstream.clone()).await;

        let resp = reqwest::get(format!("http://{proxy}/search?q=Paris"))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(
            resp.headers()
                .get(http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(resp.text().await.unwrap(), PARIS);

        let (params, agent) = upstream.seen.lock().unwrap().clone().expect("upstream hit");
        assert_eq!(params.get("q").map(String::as_str), Some("Paris"));
        assert_eq!(params.get("format").map(String::as_str), Some("json"));
        assert_eq!(agent.as_deref(), Some(USER_AGENT));
    }

    #[tokio::test]
    async fn upstream_status_error_is_hidden() {
        let upstream = Upstream {
            fail_with: Some(StatusCode::SERVICE_UNAVAILABLE),
            ..Upstream::default()
        };
        let proxy = spawn_pair(upstream.clone()).await;

        let (status, body) = get_json(format!("http://{proxy}/search?q=Paris")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "geocoding failed");
        assert!(!body.to_string().contains("database"));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_500() {
        let proxy = spawn_proxy("http://127.0.0.1:9/search".to_string()).await;
        let (status, body) = get_json(format!("http://{proxy}/search?q=Paris")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "geocoding failed");
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let proxy = spawn_proxy("http://127.0.0.1:9/search".to_string()).await;
        let resp = reqwest::get(format!("http://{proxy}/healthz")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }
}
