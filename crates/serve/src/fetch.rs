//! Tiered content fetch: walk the candidate keys in order, probing
//! the primary store and then the mirror for each, and return the
//! first readable document.

use crate::store::ContentStore;
use bytes::Bytes;
use tracing::{debug, warn};

/// Probe `keys` in order against the primary store and optional mirror.
///
/// For each candidate the primary tier is consulted first. A transport
/// failure or an undecodable object is logged and treated as a miss,
/// so a flaky tier degrades to the next probe instead of failing the
/// request. Returns `None` once every probe has missed.
#[tracing::instrument(skip_all)]
pub async fn fetch_raw(
    keys: &[String],
    primary: &dyn ContentStore,
    mirror: Option<&dyn ContentStore>,
) -> Option<String> {
    for key in keys {
        if let Some(doc) = probe(primary, key).await {
            return Some(doc);
        }
        if let Some(mirror) = mirror {
            if let Some(doc) = probe(mirror, key).await {
                return Some(doc);
            }
        }
    }
    debug!(candidates = keys.len(), "all probes missed");
    None
}

async fn probe(store: &dyn ContentStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(Some(bytes)) => decode(bytes, store.name(), key),
        Ok(None) => {
            debug!(store = store.name(), key, "miss");
            None
        }
        Err(err) => {
            warn!(store = store.name(), key, error = %err, "probe failed");
            None
        }
    }
}

fn decode(bytes: Bytes, store: &str, key: &str) -> Option<String> {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(store, key, error = %err, "object is not valid UTF-8");
            None
        }
    }
}
