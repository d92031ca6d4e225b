//! Configuration for the crawler, including the page budget, the fixed
//! politeness delay between requests, and the per-request timeout. Uses a
//! builder pattern for flexible configuration.

use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum number of pages to process in one run
    pub max_pages: u32,

    /// Delay in milliseconds between page fetches
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent to use for requests
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            delay_ms: 1000,
            timeout_secs: 10,
            user_agent: format!("docbot-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum number of pages to process
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the delay in milliseconds between page fetches
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the inter-page delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Get the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
