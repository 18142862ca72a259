mod config;
mod proxy;

use std::sync::Arc;

use geocode::GeocodeClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ProxyConfig;
use crate::proxy::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ProxyConfig::from_env()?;
    let geocoder = GeocodeClient::new(config.geocoder_url.clone(), &config.user_agent)?;
    let state = AppState {
        geocoder: Arc::new(geocoder),
    };

    let app = proxy::router(state);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        upstream = %config.geocoder_url,
        "geocode proxy listening on http://{}",
        config.addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}
