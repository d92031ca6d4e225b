//! Keyword search over the crawled corpus
//!
//! This module provides a linear scored search: every record is scored by
//! keyword overlap in its title, content, and headings, and the highest
//! scoring records are returned.

mod scoring;

pub use scoring::{rank, search, SearchHit, DEFAULT_MAX_RESULTS};
