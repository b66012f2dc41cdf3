// crates/edge/src/page.rs

//! HTML page shell: one embedded template, placeholder substitution,
//! no client-side framework.

use domain::meta::PageMetadata;
use std::borrow::Cow;

const PAGE_TEMPLATE: &str = include_str!("embed/page.html");

/// Wrap rendered fragments in the full page shell. `body` is trusted
/// HTML from the pipeline; the title is escaped here. Slots are filled
/// in template order in a single pass, so placeholder text occurring
/// inside a value is kept verbatim instead of expanded.
pub fn render_page(title: &str, meta_html: &str, body: &str) -> String {
    let title = html_escape::encode_text(title);
    let mut page = String::with_capacity(PAGE_TEMPLATE.len() + meta_html.len() + body.len());
    let mut rest = PAGE_TEMPLATE;
    for (slot, value) in [("{title}", title.as_ref()), ("{meta}", meta_html), ("{body}", body)] {
        if let Some((before, after)) = rest.split_once(slot) {
            page.push_str(before);
            page.push_str(value);
            rest = after;
        }
    }
    page.push_str(rest);
    page
}

/// Head tags for a note page.
pub fn meta_tags_html(meta: &PageMetadata) -> String {
    let mut lines = vec![
        meta_tag("name", "description", &meta.description),
        meta_tag("name", "robots", &meta.robots),
        format!("<link rel=\"canonical\" href=\"{}\" />", attr(&meta.canonical)),
        meta_tag("property", "og:title", &meta.og.title),
        meta_tag("property", "og:description", &meta.og.description),
        meta_tag("property", "og:type", &meta.og.kind),
        meta_tag("property", "og:url", &meta.og.url),
    ];
    if let Some(image) = &meta.og.image {
        lines.push(meta_tag("property", "og:image", image));
    }
    if let Some(published) = &meta.og.published_time {
        lines.push(meta_tag("property", "article:published_time", published));
    }
    lines.join("\n    ")
}

fn meta_tag(kind: &str, name: &str, content: &str) -> String {
    format!("<meta {kind}=\"{name}\" content=\"{}\" />", attr(content))
}

fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::meta::OpenGraph;

    fn sample_meta() -> PageMetadata {
        PageMetadata {
            title: "A Note | Site".to_string(),
            description: "Says \"hi\"".to_string(),
            canonical: "/n/a-note".to_string(),
            robots: "index,follow".to_string(),
            og: OpenGraph {
                title: "A Note | Site".to_string(),
                description: "Says \"hi\"".to_string(),
                kind: "article".to_string(),
                image: None,
                published_time: Some("2024-01-15".to_string()),
                url: "/n/a-note".to_string(),
            },
        }
    }

    #[test]
    fn meta_tags_cover_the_head_set() {
        let html = meta_tags_html(&sample_meta());
        assert!(html.contains("<meta name=\"robots\" content=\"index,follow\" />"));
        assert!(html.contains("<link rel=\"canonical\" href=\"/n/a-note\" />"));
        assert!(html.contains("<meta property=\"og:type\" content=\"article\" />"));
        assert!(html.contains(
            "<meta property=\"article:published_time\" content=\"2024-01-15\" />"
        ));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = meta_tags_html(&sample_meta());
        assert!(html.contains("content=\"Says &quot;hi&quot;\""));
    }

    #[test]
    fn og_image_appears_when_set() {
        let mut meta = sample_meta();
        meta.og.image = Some("https://cdn.example/c.png".to_string());
        let html = meta_tags_html(&meta);
        assert!(html.contains("<meta property=\"og:image\" content=\"https://cdn.example/c.png\" />"));
    }

    #[test]
    fn page_shell_escapes_title_and_keeps_body_html() {
        let page = render_page("Tom & Jerry", "", "<p>hi</p>");
        assert!(page.contains("<title>Tom &amp; Jerry</title>"));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.starts_with("<!doctype html>"));
    }

    #[test]
    fn placeholder_text_inside_a_value_is_kept_verbatim() {
        let page = render_page("About {body} braces", "", "<p>content</p>");
        assert!(page.contains("<title>About {body} braces</title>"));
        assert_eq!(page.matches("<p>content</p>").count(), 1);
    }
}
