//! Website crawler module
//!
//! This module provides functionality for crawling a documentation site
//! breadth-first, extracting structured content from each page, and
//! persisting the result as a JSON corpus.

mod config;
mod content_extraction;
mod crawl_loop;
mod error;
mod storage;
mod url_filter;

pub use config::CrawlerConfig;
pub use content_extraction::{extract_content, extract_links};
pub use crawl_loop::{Crawler, FetchOutcome};
pub use error::CrawlError;
pub use storage::{load_corpus, save_corpus, StorageError};
pub use url_filter::{is_same_domain, normalize_link};

use serde::{Deserialize, Serialize};

/// A single extracted documentation page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRecord {
    /// URL the page was fetched from
    pub url: String,

    /// Page title, from the first `<h1>` or the document `<title>`
    pub title: String,

    /// Whitespace-joined text of the main content area
    pub content: String,

    /// Headings inside the main content area, in document order
    pub headings: Vec<Heading>,

    /// Code snippets inside the main content area, in document order
    pub code_snippets: Vec<String>,

    /// Same-domain links discovered on the page
    pub links: Vec<String>,
}

/// A heading inside a page's main content area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, `h1` through `h6`
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,
}

/// Heading level, serialized as the lowercase tag name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Map an HTML tag name to a heading level
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }
}
