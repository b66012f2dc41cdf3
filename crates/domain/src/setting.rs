use serde::Deserialize;
use std::{net::IpAddr, path::PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Site name, appended to page titles.
    pub name: String,

    /// Domain substituted for localhost and preview hosts when
    /// resolving which content namespace a request belongs to.
    pub fallback_domain: String,

    /// Host suffix that marks a preview deployment.
    #[serde(default = "default_preview_suffix")]
    pub preview_suffix: String,
}

fn default_preview_suffix() -> String {
    ".pages.dev".to_string()
}

/// Where note markdown lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreSettings {
    /// Local directory of `.md` files.
    Fs {
        /// Content root, resolved against the start directory when relative.
        root: PathBuf,
    },

    /// Remote bucket or static host reachable over HTTP.
    Http { base_url: String },

    /// Empty in-process store.
    Memory,
}

/// Secondary read-only tier consulted when the primary store misses.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServeSettings {
    /// IP address to bind the HTTP listener.
    pub ip: IpAddr,

    /// TCP port for the HTTP listener.
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub site: SiteSettings,
    pub store: StoreSettings,
    pub mirror: Option<MirrorSettings>,
    pub serve: ServeSettings,
}
