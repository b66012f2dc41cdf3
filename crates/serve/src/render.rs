//! Markdown to HTML via comrak, with syntect class-annotated code
//! blocks so pages style code through CSS instead of inline colors.

use comrak::adapters::SyntaxHighlighterAdapter;
use comrak::options::Plugins;
use comrak::{markdown_to_html_with_plugins, Options};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::warn;

/// Markdown options for note bodies: GitHub-flavored extensions plus
/// smart punctuation, with raw HTML passed through untouched.
fn default_markdown_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.parse.smart = true;
    options.render.r#unsafe = true;
    options
}

/// Shared markdown renderer.
///
/// Construction loads the syntect syntax set, which is expensive.
/// Build one at startup and hand out references.
pub struct Renderer {
    highlighter: CodeHighlighter,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            highlighter: CodeHighlighter::new(),
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let options = default_markdown_options();
        let mut plugins = Plugins::default();
        plugins.render.codefence_syntax_highlighter = Some(&self.highlighter);
        markdown_to_html_with_plugins(markdown, &options, &plugins)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fenced-code highlighter. Languages come from the fence info string
/// and are looked up by syntect token, so `rs`, `rust` and `Rust` all
/// resolve. Unknown languages fall back to escaped plain text.
struct CodeHighlighter {
    syntaxes: SyntaxSet,
}

impl CodeHighlighter {
    fn new() -> Self {
        CodeHighlighter {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn highlight(&self, lang: &str, code: &str) -> Option<String> {
        let syntax = self.syntaxes.find_syntax_by_token(lang)?;
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
                warn!(lang, error = %err, "highlighting failed, serving plain text");
                return None;
            }
        }
        Some(generator.finalize())
    }
}

impl SyntaxHighlighterAdapter for CodeHighlighter {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> fmt::Result {
        let highlighted = lang
            .filter(|lang| !lang.is_empty())
            .and_then(|lang| self.highlight(lang, code));
        match highlighted {
            Some(html) => output.write_str(&html),
            None => output.write_str(&html_escape::encode_text(code)),
        }
    }

    fn write_pre_tag<'s>(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result {
        write_opening_tag(output, "pre", &attributes)
    }

    fn write_code_tag<'s>(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result {
        write_opening_tag(output, "code", &attributes)
    }
}

fn write_opening_tag(
    output: &mut dyn Write,
    tag: &str,
    attributes: &HashMap<&'static str, Cow<'_, str>>,
) -> fmt::Result {
    write!(output, "<{tag}")?;
    // sorted for stable output
    let mut attributes: Vec<_> = attributes.iter().collect();
    attributes.sort();
    for (name, value) in attributes {
        write!(
            output,
            " {name}=\"{}\"",
            html_escape::encode_double_quoted_attribute(value)
        )?;
    }
    write!(output, ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_paragraphs() {
        let renderer = Renderer::new();
        let html = renderer.render("hello world");
        assert_eq!(html, "<p>hello world</p>\n");
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let renderer = Renderer::new();
        let html = renderer.render("| a |\n| - |\n| b |\n\nand ~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn autolinks_bare_urls() {
        let renderer = Renderer::new();
        let html = renderer.render("visit https://example.com now");
        assert!(html.contains("<a href=\"https://example.com\">"));
    }

    #[test]
    fn raw_html_passes_through() {
        let renderer = Renderer::new();
        let html = renderer.render("before\n\n<div class=\"x\">inside</div>\n\nafter");
        assert!(html.contains("<div class=\"x\">inside</div>"));
    }

    #[test]
    fn smart_punctuation_is_on() {
        let renderer = Renderer::new();
        let html = renderer.render("pages 3 -- 7");
        assert!(html.contains("–"));
    }

    #[test]
    fn known_language_gets_classed_spans() {
        let renderer = Renderer::new();
        let html = renderer.render("```rust\nlet x = 1;\n```");
        assert!(html.contains("language-rust"));
        assert!(html.contains("<span class="));
    }

    #[test]
    fn pre_and_code_wrap_highlighted_output() {
        let renderer = Renderer::new();
        let html = renderer.render("```rust\nlet x = 1;\n```");
        assert!(html.starts_with("<pre><code class=\"language-rust\">"));
        assert!(html.trim_end().ends_with("</code></pre>"));
    }

    #[test]
    fn unknown_language_is_escaped_plain_text() {
        let renderer = Renderer::new();
        let html = renderer.render("```nosuchlang\na < b\n```");
        assert!(html.contains("a &lt; b"));
        assert!(!html.contains("<span class="));
    }

    #[test]
    fn bare_fence_is_escaped_plain_text() {
        let renderer = Renderer::new();
        let html = renderer.render("```\n<tag>\n```");
        assert!(html.contains("&lt;tag&gt;"));
    }
}
