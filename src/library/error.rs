use thiserror::Error;

/// Failure talking to the remote content library
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no library URL configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),
}

pub type Result<T> = std::result::Result<T, FetchError>;
