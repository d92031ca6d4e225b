//! Error types for the crawler module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Http(e) => CrateError::Http(e),
            CrawlError::UrlParse(e) => CrateError::Crawl(format!("URL parse error: {}", e)),
            CrawlError::Other(msg) => CrateError::Crawl(msg),
        }
    }
}
