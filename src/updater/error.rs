use thiserror::Error;

/// Errors that can occur while fetching release information
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("User-Agent must not be empty")]
    MissingUserAgent,

    #[error("A release fetch is already in progress")]
    Busy,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Release API returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid release list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No releases found")]
    NoReleases,
}
