// crates/domain/src/note.rs

// ─────────────────────────────────────────────────────────────────────────────
// Front-matter value types
// ─────────────────────────────────────────────────────────────────────────────

/// A single front-matter value in the restricted grammar: one scalar
/// string, or a flat list of strings. Nested structures do not exist
/// at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontValue {
    Scalar(String),
    List(Vec<String>),
}

impl FrontValue {
    /// Coerce to a list; a scalar becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            FrontValue::Scalar(s) => vec![s],
            FrontValue::List(items) => items,
        }
    }
}

/// Publication state of a note.
///
/// Only the exact string `private` marks a note private; any other
/// value, including typos like `Private` or `hidden`, counts as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteStatus {
    #[default]
    Public,
    Private,
}

impl NoteStatus {
    pub fn parse(raw: &str) -> Self {
        if raw == "private" {
            NoteStatus::Private
        } else {
            NoteStatus::Public
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, NoteStatus::Private)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Front matter
// ─────────────────────────────────────────────────────────────────────────────

/// Typed view over a note's front-matter block.
///
/// Known keys land in the named fields; everything else is preserved
/// verbatim in `extra`, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Publication date, kept as the raw string from the document.
    pub date: Option<String>,
    /// Cover image URL for social previews.
    pub cover: Option<String>,
    pub category: Option<String>,
    /// Owning domain; a note without one is visible on every domain.
    pub domain: Option<String>,
    pub status: NoteStatus,
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
    /// Unrecognized keys, in document order. Duplicates are kept.
    pub extra: Vec<(String, FrontValue)>,
}

impl FrontMatter {
    /// Route one parsed key/value pair into the typed fields.
    ///
    /// Scalar-only keys given a list shape keep their typed slot empty
    /// and land in `extra` instead. `tags` and `aliases` accept either
    /// shape, coercing a scalar to a one-element list. A repeated typed
    /// key overwrites the earlier occurrence.
    pub fn insert(&mut self, key: &str, value: FrontValue) {
        match (key, value) {
            ("title", FrontValue::Scalar(s)) => self.title = Some(s),
            ("description", FrontValue::Scalar(s)) => self.description = Some(s),
            ("date", FrontValue::Scalar(s)) => self.date = Some(s),
            ("cover", FrontValue::Scalar(s)) => self.cover = Some(s),
            ("category", FrontValue::Scalar(s)) => self.category = Some(s),
            ("domain", FrontValue::Scalar(s)) => self.domain = Some(s),
            ("status", FrontValue::Scalar(s)) => self.status = NoteStatus::parse(&s),
            ("tags", value) => self.tags = value.into_list(),
            ("aliases", value) => self.aliases = value.into_list(),
            (key, value) => self.extra.push((key.to_string(), value)),
        }
    }

    pub fn is_private(&self) -> bool {
        self.status.is_private()
    }

    /// Whether this note may be served on `domain`. A note without a
    /// `domain` key matches everywhere; one with a key matches only the
    /// exact host it names.
    pub fn matches_domain(&self, domain: &str) -> bool {
        match &self.domain {
            Some(owner) => owner == domain,
            None => true,
        }
    }

    /// Display title for a note at `slug`: the `title` key when set,
    /// otherwise the slug with hyphens turned into spaces.
    pub fn display_title(&self, slug: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| slug.replace('-', " "))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Assembled note
// ─────────────────────────────────────────────────────────────────────────────

/// A fully assembled note, ready for page rendering.
#[derive(Debug, Clone)]
pub struct Note {
    pub front_matter: FrontMatter,
    /// Markdown body after wikilink rewriting, before HTML conversion.
    pub raw_body: String,
    /// Rendered HTML for the body.
    pub html: String,
    pub slug: String,
    /// Whether the body already opens with a level-1 heading, in which
    /// case the page shell must not add its own.
    pub has_leading_heading: bool,
}

impl Note {
    pub fn title(&self) -> String {
        self.front_matter.display_title(&self.slug)
    }
}
