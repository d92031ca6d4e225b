//! Breadth-first crawl loop with a page budget and politeness delay

use std::collections::{HashSet, VecDeque};

use reqwest::Client;
use scraper::Html;
use tracing::{error, info};
use url::Url;

use crate::crawler::content_extraction::{extract_content, extract_links};
use crate::crawler::error::CrawlError;
use crate::crawler::{CrawlerConfig, PageRecord};

/// Result of a single fetch attempt inside the crawl loop.
///
/// Failures are per-page and non-fatal: the loop logs them and moves on
/// without marking the URL visited. A failed URL still consumes a unit of
/// the page budget.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page fetched and parsed successfully
    Fetched {
        /// Extracted page content
        record: PageRecord,
        /// Same-domain links discovered on the page, normalized
        links: Vec<String>,
    },

    /// Fetch or parse failed
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}

/// Breadth-first website crawler.
///
/// One `run` call traverses the site starting from a base URL, keeping a
/// visited set scoped to that run. Pages whose extracted content is empty
/// are fetched and traversed but not recorded.
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
    visited: HashSet<String>,
    records: Vec<PageRecord>,
}

impl Crawler {
    /// Create a crawler with the given configuration
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            config,
            client,
            visited: HashSet::new(),
            records: Vec::new(),
        })
    }

    /// Crawl breadth-first from `base_url` until the frontier is exhausted
    /// or the page budget is reached. Both are normal termination.
    pub async fn run(&mut self, base_url: &str) -> Result<&[PageRecord], CrawlError> {
        let base = Url::parse(base_url)?;
        info!("Starting crawl for {}", base_url);

        let mut frontier: VecDeque<String> = VecDeque::from([base_url.to_string()]);
        let mut pages_processed = 0u32;

        while pages_processed < self.config.max_pages {
            let Some(current) = frontier.pop_front() else {
                break;
            };

            // Duplicate frontier entries are dropped here without
            // consuming a budget unit
            if self.visited.contains(&current) {
                continue;
            }

            match self.fetch_page(&current, &base).await {
                FetchOutcome::Fetched { record, links } => {
                    if !record.content.is_empty() {
                        self.records.push(record);
                    }
                    self.visited.insert(current);
                    frontier.extend(links);
                }
                FetchOutcome::Failed { reason } => {
                    error!("Error scraping {}: {}", current, reason);
                }
            }

            pages_processed += 1;
            if pages_processed % 10 == 0 {
                info!("Progress: {} pages processed", pages_processed);
            }

            tokio::time::sleep(self.config.delay()).await;
        }

        info!(
            "Crawl complete! {} pages processed, {} with content",
            pages_processed,
            self.records.len()
        );
        Ok(&self.records)
    }

    /// Fetch and parse one page, producing the extraction results or a
    /// per-page failure
    async fn fetch_page(&self, url: &str, base: &Url) -> FetchOutcome {
        info!("Scraping: {}", url);

        let current = match Url::parse(url) {
            Ok(current) => current,
            Err(e) => {
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let document = Html::parse_document(&body);
        let mut record = extract_content(&document, url);
        let mut links = extract_links(&document, &current, base, &self.visited);
        // The page counts as visited by the time its links are followed,
        // so an anchor that normalizes back to this URL is dropped
        links.retain(|link| link != url);
        record.links = links.clone();

        FetchOutcome::Fetched { record, links }
    }

    /// Records accumulated so far
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Consume the crawler and take the accumulated records
    pub fn into_records(self) -> Vec<PageRecord> {
        self.records
    }
}
