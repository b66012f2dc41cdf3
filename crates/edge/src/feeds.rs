// crates/edge/src/feeds.rs

//! Machine-readable surfaces: the sitemap, robots.txt and the
//! llms.txt manifest pair.
//!
//! Builders are pure functions over a store listing so they can be
//! tested without a server.

use chrono::{DateTime, SecondsFormat, Utc};
use serve::store::ObjectInfo;

/// Whether a stored key is a listable note.
///
/// Service files are excluded by substring on the full key, which
/// drops partials like `a.example/header.md` along with every
/// domain's `index.md`.
pub fn is_note_key(key: &str) -> bool {
    key.ends_with(".md")
        && !key.contains("header")
        && !key.contains("footer")
        && !key.contains("index")
}

/// Slug for a storage key: extension off, then the first path segment
/// off when there is one.
pub fn note_slug(key: &str) -> String {
    let stem = key.strip_suffix(".md").unwrap_or(key);
    match stem.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => stem.to_string(),
    }
}

fn iso_millis(when: DateTime<Utc>) -> String {
    when.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// XML sitemap: the home page plus one entry per listed note.
pub fn build_sitemap(origin: &str, entries: &[ObjectInfo], now: DateTime<Utc>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    xml.push_str(&url_entry(
        &format!("{origin}/"),
        &iso_millis(now),
        "daily",
        "1.0",
    ));
    for entry in entries.iter().filter(|entry| is_note_key(&entry.key)) {
        let loc = format!("{origin}/n/{}", note_slug(&entry.key));
        let lastmod = iso_millis(entry.last_modified.unwrap_or(now));
        xml.push_str(&url_entry(&loc, &lastmod, "weekly", "0.6"));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn url_entry(loc: &str, lastmod: &str, changefreq: &str, priority: &str) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        html_escape::encode_text(loc)
    )
}

/// Index manifest for language-model crawlers.
pub fn build_llms_txt(site_name: &str, origin: &str, entries: &[ObjectInfo]) -> String {
    let mut out = format!(
        "# {site_name} - LLMs.txt\n\n\
         > Zettelkasten notes and articles\n\n\
         Collection of notes, articles and thoughts in Zettelkasten format.\n\n\
         ## Available Documents\n\n"
    );
    for entry in entries.iter().filter(|entry| is_note_key(&entry.key)) {
        let slug = note_slug(&entry.key);
        out.push_str(&format!(
            "- [{}]({origin}/n/{slug}.md)\n",
            manifest_title(&slug)
        ));
    }
    out.push_str(
        "\n## Additional Resources\n\n\
         - [Full Content](/llms-full.txt) - All content in single file\n\
         - [Sitemap](/sitemap.xml) - Site structure\n\n\
         ## Notes\n\n\
         - Content is served from the configured object store\n\
         - Domain-prefixed keys shadow the shared namespace\n",
    );
    out
}

/// Manifest display title: hyphens to spaces, first letter upper.
fn manifest_title(slug: &str) -> String {
    let spaced = slug.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// One fetched document in the full-content export.
pub struct NoteDump {
    pub key: String,
    pub slug: String,
    pub body: Option<String>,
}

/// Full-content export, one fenced section per note. Notes that fail
/// to load keep a stub section so the export never fails outright.
pub fn build_llms_full(site_name: &str, notes: &[NoteDump]) -> String {
    let mut out = format!(
        "# {site_name} - Full Content Export\n\n\
         > Complete content dump of all notes and articles\n\n\
         ===\n\n"
    );
    for note in notes {
        match &note.body {
            Some(body) => {
                out.push_str(&format!(
                    "## {}\n\n{body}\n\n===***===***==***===\n\n",
                    note.slug
                ));
            }
            None => {
                out.push_str(&format!("## {} (Error loading content)\n\n===\n\n", note.key));
            }
        }
    }
    out
}

/// Robots policy: allow everything, advertise the sitemap.
pub fn build_robots(origin: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {origin}/sitemap.xml\n")
}
