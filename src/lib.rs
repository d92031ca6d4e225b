//! # docbot - Documentation Chatbot Pipeline
//!
//! This crate crawls a documentation website, extracts structured page
//! content, persists the result as a JSON corpus, and answers questions
//! over that corpus with a keyword-search chat interface.
//!
//! ## Features
//!
//! - Breadth-first, same-domain website crawling with a page budget and
//!   a fixed politeness delay between requests
//! - Structured content extraction (title, body text, headings, code
//!   snippets) from each crawled page
//! - Flat JSON corpus storage with human-readable formatting
//! - Scored keyword search over title, content, and headings
//! - Sentence-extraction response composition with source attribution
//! - An HTTP chat API with process-lifetime session history
//!
//! ## Example
//!
//! ```rust,no_run
//! use docbot::crawler::{Crawler, CrawlerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlerConfig::builder().max_pages(50).build();
//!     let mut crawler = Crawler::new(config)?;
//!     let records = crawler.run("https://docs.example.com/").await?;
//!     println!("crawled {} pages", records.len());
//!     Ok(())
//! }
//! ```

mod error;

pub mod bot;
pub mod crawler;
pub mod search;
pub mod server;

pub use error::Error;

/// Re-export of commonly used types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
