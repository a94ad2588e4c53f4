//! Error types for the gallery service.

use thiserror::Error;

/// Result type alias using the gallery's Error type.
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Everything that can go wrong while answering a gallery query.
///
/// The `Display` output is what callers see in the `error` field of the
/// degraded response envelope, so messages stay short and human readable.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Required configuration is missing or unparseable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure talking to Notion
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Notion answered 2xx but the body was not a query page
    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::Decode(e.to_string())
    }
}
