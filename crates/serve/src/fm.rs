//! Restricted front matter: a `---` fenced block of `key: value`
//! lines at the very start of a document.
//!
//! This is deliberately not a YAML parser. The grammar is:
//! - one scalar per line, with an optional matching pair of quotes
//! - `[a, b]` flat lists of scalars
//! - no nesting, no multi-line values, no comments

use domain::note::{FrontMatter, FrontValue};
use regex::Regex;
use std::sync::LazyLock;

/// Fenced block opening the document. Trailing spaces or tabs after a
/// fence and CRLF line endings are tolerated.
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*\r?\n(.*)\z").expect("front matter regex")
});

/// Split a raw document into parsed front matter and body.
///
/// A document that does not open with a well-formed fenced block is
/// returned unchanged: empty front matter, the whole input as body.
/// Inside the block, each line is split at its first colon; lines
/// without one are skipped. A line opening with a colon keeps its
/// empty key and lands among the unknown extras.
pub fn parse_front_matter(raw: &str) -> (FrontMatter, &str) {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return (FrontMatter::default(), raw);
    };
    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let mut front = FrontMatter::default();
    for line in block.lines() {
        let Some(colon) = line.find(':') else { continue };
        let key = line[..colon].trim();
        let value = line[colon + 1..].trim();
        front.insert(key, parse_value(value));
    }
    (front, body)
}

fn parse_value(raw: &str) -> FrontValue {
    let unquoted = strip_matching_quotes(raw);
    if let Some(inner) = unquoted
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        if inner.trim().is_empty() {
            return FrontValue::List(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| strip_item_quotes(item.trim()).to_string())
            .collect();
        return FrontValue::List(items);
    }
    FrontValue::Scalar(unquoted.to_string())
}

/// Remove one wrapping pair of matching quotes, double or single.
fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// List elements strip at most one leading and one trailing quote
/// character, independently and of either kind.
fn strip_item_quotes(item: &str) -> &str {
    let item = item
        .strip_prefix('"')
        .or_else(|| item.strip_prefix('\''))
        .unwrap_or(item);
    item.strip_suffix('"')
        .or_else(|| item.strip_suffix('\''))
        .unwrap_or(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::note::NoteStatus;

    #[test]
    fn document_without_front_matter_is_all_body() {
        let raw = "# Just a heading\n\nSome text.";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn fence_must_start_at_first_byte() {
        let raw = "\n---\ntitle: x\n---\nbody";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front.title, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn parses_typed_fields_and_exact_body() {
        let raw = "---\ntitle: Test Note\ndescription: A note for testing\ndate: 2024-01-15\ncategory: essays\nstatus: private\n---\n# Heading\n\nBody text.";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("Test Note"));
        assert_eq!(front.description.as_deref(), Some("A note for testing"));
        assert_eq!(front.date.as_deref(), Some("2024-01-15"));
        assert_eq!(front.category.as_deref(), Some("essays"));
        assert_eq!(front.status, NoteStatus::Private);
        assert_eq!(body, "# Heading\n\nBody text.");
    }

    #[test]
    fn value_splits_at_first_colon_only() {
        let raw = "---\ntitle: Hello: World\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("Hello: World"));
    }

    #[test]
    fn quotes_are_stripped_once() {
        let raw = "---\ntitle: \"Quoted Title\"\ncover: 'single.png'\ndomain: \"mismatched'\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("Quoted Title"));
        assert_eq!(front.cover.as_deref(), Some("single.png"));
        // mismatched pair stays as-is
        assert_eq!(front.domain.as_deref(), Some("\"mismatched'"));
    }

    #[test]
    fn lists_split_on_commas_with_item_quotes_stripped() {
        let raw = "---\ntags: [rust, \"async\", 'web']\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.tags, vec!["rust", "async", "web"]);
    }

    #[test]
    fn empty_list_is_empty() {
        let raw = "---\ntags: []\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert!(front.tags.is_empty());
    }

    #[test]
    fn scalar_tags_become_one_element_list() {
        let raw = "---\ntags: solo\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.tags, vec!["solo"]);
    }

    #[test]
    fn list_for_scalar_key_lands_in_extra() {
        let raw = "---\ntitle: [not, a, title]\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.title, None);
        assert_eq!(front.extra.len(), 1);
        assert_eq!(
            front.extra[0],
            (
                "title".to_string(),
                FrontValue::List(vec!["not".into(), "a".into(), "title".into()])
            )
        );
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let raw = "---\nweight: 3\nseries: intro\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.extra.len(), 2);
        assert_eq!(front.extra[0].1, FrontValue::Scalar("3".into()));
    }

    #[test]
    fn lines_without_a_colon_are_skipped() {
        let raw = "---\njust some text\ntitle: ok\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("ok"));
        assert!(front.extra.is_empty());
    }

    #[test]
    fn leading_colon_keeps_an_empty_key() {
        let raw = "---\n: dangling\ntitle: ok\n---\nx";
        let (front, _) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("ok"));
        assert_eq!(
            front.extra,
            vec![(String::new(), FrontValue::Scalar("dangling".into()))]
        );
    }

    #[test]
    fn unterminated_fence_is_all_body() {
        let raw = "---\ntitle: dangling\nno closing fence";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front.title, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn empty_block_yields_empty_front_matter() {
        let raw = "---\n\n---\nbody here";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, "body here");
    }

    #[test]
    fn crlf_documents_parse() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nbody";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body");
    }

    #[test]
    fn trailing_spaces_after_fences_are_tolerated() {
        let raw = "---  \ntitle: Spaced\n---\t\nbody";
        let (front, body) = parse_front_matter(raw);
        assert_eq!(front.title.as_deref(), Some("Spaced"));
        assert_eq!(body, "body");
    }
}
