//! Flat-file JSON storage for the crawled corpus
//!
//! The corpus is one JSON array of page records, pretty-printed for human
//! readability, with non-ASCII text stored literally. Each save fully
//! replaces the file.

use std::path::Path;

use tokio::fs;

use crate::crawler::PageRecord;
use crate::error::Error as CrateError;

/// Error type for corpus storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for CrateError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => CrateError::Io(e),
            StorageError::Json(e) => CrateError::Json(e),
        }
    }
}

/// Write the full corpus to `path`, replacing any previous contents
pub async fn save_corpus(path: impl AsRef<Path>, records: &[PageRecord]) -> Result<(), StorageError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).await?;
    Ok(())
}

/// Load the full corpus from `path`.
///
/// A missing file surfaces as an IO error; a present but malformed file is
/// a JSON error. Neither is recovered from here.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<PageRecord>, StorageError> {
    let json = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}
