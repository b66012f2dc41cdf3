// crates/edge/src/store/mem.rs

//! In-memory store, for tests and the `memory` settings kind.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serve::store::{ContentStore, ObjectInfo, Result};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, (Bytes, DateTime<Utc>)>,
}

impl MemoryStore {
    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<Bytes>) {
        self.objects.insert(key.into(), (body.into(), Utc::now()));
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.objects.get(key).map(|(bytes, _)| bytes.clone()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>> {
        Ok(self
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, (bytes, modified))| ObjectInfo {
                key: key.clone(),
                size: bytes.len() as u64,
                last_modified: Some(*modified),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_and_list_by_prefix() {
        let mut store = MemoryStore::default();
        store.insert("a/one.md", "1");
        store.insert("a/two.md", "2");
        store.insert("b/three.md", "3");

        let bytes = store.get("a/one.md").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"1");
        assert_eq!(store.get("a/none.md").await.unwrap(), None);

        let listed = store.list("a/").await.unwrap();
        let keys: Vec<&str> = listed.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["a/one.md", "a/two.md"]);
        assert_eq!(listed[0].size, 1);
    }
}
