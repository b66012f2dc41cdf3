// crates/domain/src/meta.rs

/// Open Graph property set for a page.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    /// `og:type` value; notes always publish as `article`.
    pub kind: String,
    pub image: Option<String>,
    pub published_time: Option<String>,
    pub url: String,
}

/// Everything the page shell needs for the document head.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    /// Full `<title>` text, site name included.
    pub title: String,
    pub description: String,
    /// Absolute when the note is pinned to a domain, site-relative otherwise.
    pub canonical: String,
    /// `index,follow` or `noindex,nofollow`.
    pub robots: String,
    pub og: OpenGraph,
}
