use std::env;
use std::net::SocketAddr;

use geocode::DEFAULT_GEOCODER_URL;

const DEFAULT_ADDR: &str = "127.0.0.1:9200";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PROXY_ADDR {value:?}: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("GEOCODER_USER_AGENT must not be empty")]
    EmptyUserAgent,
}

#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub addr: SocketAddr,
    pub geocoder_url: String,
    /// Sent upstream as `User-Agent`; Nominatim's usage policy requires one.
    pub user_agent: String,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("PROXY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr.parse().map_err(|source| ConfigError::Addr {
            value: raw_addr.clone(),
            source,
        })?;

        let user_agent = lookup("GEOCODER_USER_AGENT")
            .unwrap_or_else(|| format!("atlas-nearby/{}", env!("CARGO_PKG_VERSION")));
        if user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        Ok(Self {
            addr,
            geocoder_url: lookup("GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
            user_agent,
        })
    }
}
