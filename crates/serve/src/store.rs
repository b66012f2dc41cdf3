//! Storage abstraction the pipeline reads from.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failure. A non-2xx status is a miss, not
    /// an error.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The backend cannot enumerate its keys.
    #[error("listing not supported by the {0} store")]
    Unsupported(&'static str),

    #[error("backend error: {0}")]
    Backend(String),
}

/// A stored object as seen by `list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Full storage key, e.g. `a.example/my-note.md`.
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Read-only view of one content tier.
///
/// Keys are `/`-separated relative paths. `get` distinguishes a clean
/// miss (`Ok(None)`) from a failed probe (`Err`); the fetch layer
/// decides that neither is fatal.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Enumerate objects whose key starts with `prefix`.
    async fn list(&self, _prefix: &str) -> Result<Vec<ObjectInfo>> {
        Err(StoreError::Unsupported(self.name()))
    }

    /// Short backend label for log lines.
    fn name(&self) -> &'static str;
}
