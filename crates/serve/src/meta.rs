//! Page metadata derivation.

use domain::meta::{OpenGraph, PageMetadata};
use domain::note::FrontMatter;

/// Derive head metadata for a note page.
///
/// The title gets the site name appended unless it already equals it.
/// Notes pinned to a domain get an absolute canonical URL on that
/// domain; shared notes stay site-relative. Private notes are marked
/// `noindex,nofollow`.
pub fn generate_metadata(front: &FrontMatter, slug: &str, site_name: &str) -> PageMetadata {
    let title = front.display_title(slug);
    let description = front
        .description
        .clone()
        .unwrap_or_else(|| format!("Note: {title}"));
    let full_title = if title == site_name {
        title
    } else {
        format!("{title} | {site_name}")
    };
    let canonical = match &front.domain {
        Some(domain) => format!("https://{domain}/n/{slug}"),
        None => format!("/n/{slug}"),
    };
    let robots = if front.is_private() {
        "noindex,nofollow"
    } else {
        "index,follow"
    };

    PageMetadata {
        title: full_title.clone(),
        description: description.clone(),
        canonical: canonical.clone(),
        robots: robots.to_string(),
        og: OpenGraph {
            title: full_title,
            description,
            kind: "article".to_string(),
            image: front.cover.clone(),
            published_time: front.date.clone(),
            url: canonical,
        },
    }
}
