// crates/edge/src/store/http.rs

//! HTTP-backed content store: any static host or public bucket that
//! serves markdown by path.

use async_trait::async_trait;
use bytes::Bytes;
use serve::store::{ContentStore, Result, StoreError};
use tracing::debug;

pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
    name: &'static str,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_name(base_url, "http")
    }

    /// Same backend under a different log label, used for the mirror
    /// tier.
    pub fn with_name(base_url: &str, name: &'static str) -> Self {
        HttpStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            name,
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let url = self.url_for(key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        if !response.status().is_success() {
            debug!(url = %url, status = %response.status(), "non-success response");
            return Ok(None);
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        Ok(Some(bytes))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let store = HttpStore::new("https://bucket.example/");
        assert_eq!(
            store.url_for("shared/note.md"),
            "https://bucket.example/shared/note.md"
        );
    }
}
