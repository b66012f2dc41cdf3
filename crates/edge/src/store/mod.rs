//! Store backends and their settings dispatch.

mod fs;
mod http;
mod mem;

pub use fs::FsStore;
pub use http::HttpStore;
pub use mem::MemoryStore;

use crate::Error;
use domain::setting::{MirrorSettings, StoreSettings};
use serve::store::ContentStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build the primary store from settings. Relative filesystem roots
/// resolve against the start directory.
pub async fn from_settings(
    dir: &Path,
    settings: &StoreSettings,
) -> Result<Arc<dyn ContentStore>, Error> {
    match settings {
        StoreSettings::Fs { root } => {
            let root = if root.is_absolute() {
                root.clone()
            } else {
                dir.join(root)
            };
            let store = FsStore::open(root).await?;
            info!(root = %store.root().display(), "using filesystem store");
            Ok(Arc::new(store))
        }
        StoreSettings::Http { base_url } => {
            info!(base_url = %base_url, "using HTTP store");
            Ok(Arc::new(HttpStore::new(base_url)))
        }
        StoreSettings::Memory => {
            info!("using empty in-memory store");
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}

/// The mirror tier is always HTTP; it points at a public bucket host
/// that keeps serving while the primary is down.
pub fn mirror_from_settings(settings: Option<&MirrorSettings>) -> Option<Arc<dyn ContentStore>> {
    settings.map(|mirror| {
        info!(base_url = %mirror.base_url, "mirror tier enabled");
        Arc::new(HttpStore::with_name(&mirror.base_url, "mirror")) as Arc<dyn ContentStore>
    })
}
