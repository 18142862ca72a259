use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum NearbyError {
    #[error("client identifier is empty")]
    MissingClientId,
    #[error("invalid content api endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("content request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content api returned {0}")]
    Status(StatusCode),
    #[error("content response malformed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("content api error {code}: {info}")]
    Api { code: String, info: String },
}
