// crates/edge/src/store/fs.rs

//! Filesystem-backed content store for local development and
//! single-box deployments.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serve::store::{ContentStore, ObjectInfo, Result, StoreError};
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&root).await?;
        Ok(FsStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a storage key to a path strictly inside the root. Keys are
    /// request-controlled, so anything that is not a plain relative
    /// path is rejected.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("empty key".to_string()));
        }
        let relative = Path::new(key);
        let clean = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !clean {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.key_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let root = self.root.clone();
        let prefix = prefix.to_string();
        tokio::task::spawn_blocking(move || list_sync(&root, &prefix))
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?
    }

    fn name(&self) -> &'static str {
        "fs"
    }
}

fn list_sync(root: &Path, prefix: &str) -> Result<Vec<ObjectInfo>> {
    let mut objects = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|err| StoreError::Backend(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let key = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !key.starts_with(prefix) {
            continue;
        }
        let meta = entry
            .metadata()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        objects.push(ObjectInfo {
            key,
            size: meta.len(),
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
        });
    }
    objects.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(objects)
}
