//! Chat bot over the crawled corpus
//!
//! The bot loads the JSON corpus once at startup and answers questions by
//! running a keyword search and composing a response from the top result.

mod responder;
mod sessions;

pub use responder::compose_response;
pub use sessions::{ChatMessage, ChatSession, SessionError, SessionStore};

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::crawler::{load_corpus, PageRecord};
use crate::error::Result;
use crate::search::{search, DEFAULT_MAX_RESULTS};

/// Source attribution attached to a chat answer
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    /// Title of the source page
    pub title: String,

    /// URL of the source page
    pub url: String,
}

/// Keyword-search chat bot over a loaded corpus
pub struct DocBot {
    docs_file: PathBuf,
    corpus: Vec<PageRecord>,
}

impl DocBot {
    /// Load the corpus from `docs_file`.
    ///
    /// A missing file is a warning and the bot starts with an empty corpus;
    /// a present but malformed file is a fatal error.
    pub async fn load(docs_file: impl Into<PathBuf>) -> Result<Self> {
        let docs_file = docs_file.into();

        let corpus = if tokio::fs::try_exists(&docs_file).await? {
            let corpus = load_corpus(&docs_file).await?;
            info!("Loaded {} documentation pages", corpus.len());
            corpus
        } else {
            warn!(
                "Documentation file {} not found. Please run the crawler first.",
                docs_file.display()
            );
            Vec::new()
        };

        Ok(Self { docs_file, corpus })
    }

    /// Build a bot directly from in-memory records
    pub fn from_records(docs_file: impl Into<PathBuf>, corpus: Vec<PageRecord>) -> Self {
        Self {
            docs_file: docs_file.into(),
            corpus,
        }
    }

    /// Answer a chat message: search the corpus, compose a response from
    /// the top result, and attribute the sources consulted.
    pub fn chat(&self, message: &str) -> (String, Vec<SourceRef>) {
        let results = search(message, &self.corpus, DEFAULT_MAX_RESULTS);
        let response = compose_response(message, &results);

        let sources = results
            .iter()
            .map(|record| SourceRef {
                title: record.title.clone(),
                url: record.url.clone(),
            })
            .collect();

        (response, sources)
    }

    /// Number of records in the loaded corpus
    pub fn docs_loaded(&self) -> usize {
        self.corpus.len()
    }

    /// Whether the corpus file currently exists on disk
    pub fn docs_file_exists(&self) -> bool {
        self.docs_file.exists()
    }

    /// The loaded corpus
    pub fn corpus(&self) -> &[PageRecord] {
        &self.corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::save_corpus;

    fn record(title: &str, content: &str) -> PageRecord {
        PageRecord {
            url: format!("https://docs.x.com/{}", title.to_lowercase().replace(' ', "-")),
            title: title.to_string(),
            content: content.to_string(),
            headings: Vec::new(),
            code_snippets: Vec::new(),
            links: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_serves_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let bot = DocBot::load(dir.path().join("absent.json")).await.unwrap();

        assert_eq!(bot.docs_loaded(), 0);
        assert!(!bot.docs_file_exists());

        let (response, sources) = bot.chat("anything");
        assert!(response.contains("couldn't find"));
        assert!(sources.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        assert!(DocBot::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_round_trips_saved_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        save_corpus(&path, &[record("Install", "run the installer now please")])
            .await
            .unwrap();

        let bot = DocBot::load(&path).await.unwrap();
        assert_eq!(bot.docs_loaded(), 1);
        assert!(bot.docs_file_exists());
    }

    #[test]
    fn test_chat_attributes_sources() {
        let bot = DocBot::from_records(
            "docs.json",
            vec![record(
                "Installation Guide",
                "Run the installation steps described in this page first",
            )],
        );

        let (response, sources) = bot.chat("installation");
        assert!(response.starts_with("Based on 'Installation Guide':"));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://docs.x.com/installation-guide");
    }
}
