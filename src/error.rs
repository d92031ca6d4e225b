//! Error types for the docbot crate

use thiserror::Error;

/// Result type for docbot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for docbot operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Chat session error
    #[error("Session error: {0}")]
    Session(String),
}
