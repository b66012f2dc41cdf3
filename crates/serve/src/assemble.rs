//! Final assembly: front matter split off, wikilinks rewritten,
//! markdown rendered, heading presence detected.

use crate::render::Renderer;
use crate::{fm, wikilink};
use domain::note::Note;
use regex::Regex;
use std::sync::LazyLock;

/// A body whose first non-whitespace content is a level-1 ATX heading.
static LEADING_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s+").expect("leading heading regex"));

/// Build a complete [`Note`] from a raw stored document.
///
/// The body keeps plain wikilink rewriting; sibling `.md` links are a
/// listing-page affordance and never appear inside notes.
pub fn assemble(raw: &str, slug: &str, renderer: &Renderer) -> Note {
    let (front_matter, body) = fm::parse_front_matter(raw);
    let raw_body = wikilink::rewrite(body, false);
    let html = renderer.render(&raw_body);
    let has_leading_heading = LEADING_H1.is_match(raw_body.trim());
    Note {
        front_matter,
        raw_body,
        html,
        slug: slug.to_string(),
        has_leading_heading,
    }
}

/// Render a stored document as a bare HTML fragment, front matter
/// dropped. Used for headers, footers and index listings, which never
/// become full [`Note`]s.
pub fn render_fragment(raw: &str, sibling_links: bool, renderer: &Renderer) -> String {
    let (_, body) = fm::parse_front_matter(raw);
    renderer.render(&wikilink::rewrite(body, sibling_links))
}
