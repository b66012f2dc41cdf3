//! `[[wikilink]]` rewriting.
//!
//! Stage one turns `[[Some Page]]` into a standard markdown link to
//! `/n/some-page`. Stage two, used on listing pages, appends a
//! ` ([.md](...))` sibling after every note link so readers can reach
//! the raw markdown directly.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// A markdown link whose target lives under `/n/`.
static NOTE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(/n/([^)]+)\)").expect("note link regex"));

/// Slug for a wikilink target: lowercased, each run of whitespace
/// collapsed to a single hyphen.
pub fn slugify(text: &str) -> String {
    WHITESPACE.replace_all(&text.to_lowercase(), "-").into_owned()
}

/// Rewrite `[[target]]` wikilinks into `/n/` markdown links.
///
/// With `sibling_links` set, every note link also gets a raw-markdown
/// sibling appended. Links already carrying a sibling and the sibling
/// links themselves are left alone, so the pass is idempotent.
pub fn rewrite(body: &str, sibling_links: bool) -> String {
    let rewritten = WIKILINK.replace_all(body, |caps: &Captures| {
        let text = &caps[1];
        format!("[{text}](/n/{})", slugify(text))
    });
    if !sibling_links {
        return rewritten.into_owned();
    }
    append_siblings(&rewritten)
}

fn append_siblings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tail = 0;
    for caps in NOTE_LINK.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        out.push_str(&text[tail..whole.end()]);
        tail = whole.end();

        let slug = &caps[2];
        let is_sibling = &caps[1] == ".md" && slug.ends_with(".md");
        let already_has_one = text[tail..].starts_with(" ([.md](");
        if !is_sibling && !already_has_one {
            out.push_str(&format!(" ([.md](/n/{slug}.md))"));
        }
    }
    out.push_str(&text[tail..]);
    out
}
