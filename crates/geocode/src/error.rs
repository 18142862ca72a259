use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("client identifier is empty")]
    MissingClientId,
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("geocoder request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("geocoder returned {0}")]
    Status(StatusCode),
    #[error("geocoder response malformed: {0}")]
    Decode(#[from] serde_json::Error),
}
