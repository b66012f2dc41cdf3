// crates/serve/src/resolver.rs

//! Request-host to content-domain resolution, and slug to storage-key
//! expansion.
//!
//! The same notes bucket serves several domains. Each domain owns a
//! key prefix, `shared/` holds cross-domain notes, and bare keys are
//! kept for content that predates the prefix scheme.

/// Resolve the content domain for a request host.
///
/// Strips any port, then maps localhost and preview hosts to the
/// configured fallback so local and staging traffic see production
/// content. Unknown hosts pass through unchanged.
pub fn resolve_domain(host: &str, fallback_domain: &str, preview_suffix: &str) -> String {
    let domain = host.split(':').next().unwrap_or(host);
    let is_preview = !preview_suffix.is_empty() && domain.ends_with(preview_suffix);
    if domain == "localhost" || domain == "127.0.0.1" || is_preview {
        return fallback_domain.to_string();
    }
    domain.to_string()
}

/// Candidate storage keys for a slug, most specific first.
///
/// The domain's own copy shadows `shared/`, which shadows the bare
/// legacy key. Duplicates collapse, keeping their first position.
pub fn build_keys(slug: &str, domain: Option<&str>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(3);
    if let Some(domain) = domain.filter(|d| !d.is_empty()) {
        push_unique(&mut keys, format!("{domain}/{slug}.md"));
    }
    push_unique(&mut keys, format!("shared/{slug}.md"));
    push_unique(&mut keys, format!("{slug}.md"));
    keys
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "notes.example";
    const PREVIEW: &str = ".pages.dev";

    #[test]
    fn port_is_stripped() {
        assert_eq!(resolve_domain("a.example:8080", FALLBACK, PREVIEW), "a.example");
    }

    #[test]
    fn local_hosts_map_to_fallback() {
        assert_eq!(resolve_domain("localhost:3000", FALLBACK, PREVIEW), FALLBACK);
        assert_eq!(resolve_domain("127.0.0.1", FALLBACK, PREVIEW), FALLBACK);
    }

    #[test]
    fn preview_hosts_map_to_fallback() {
        assert_eq!(
            resolve_domain("deadbeef.my-site.pages.dev", FALLBACK, PREVIEW),
            FALLBACK
        );
    }

    #[test]
    fn real_domains_pass_through() {
        assert_eq!(resolve_domain("blog.example", FALLBACK, PREVIEW), "blog.example");
    }

    #[test]
    fn empty_preview_suffix_matches_nothing() {
        assert_eq!(resolve_domain("blog.example", FALLBACK, ""), "blog.example");
    }

    #[test]
    fn keys_run_specific_to_general() {
        assert_eq!(
            build_keys("my-note", Some("a.example")),
            vec![
                "a.example/my-note.md".to_string(),
                "shared/my-note.md".to_string(),
                "my-note.md".to_string(),
            ]
        );
    }

    #[test]
    fn no_domain_skips_the_domain_key() {
        assert_eq!(
            build_keys("my-note", None),
            vec!["shared/my-note.md".to_string(), "my-note.md".to_string()]
        );
        assert_eq!(build_keys("my-note", Some("")).len(), 2);
    }

    #[test]
    fn duplicate_candidates_collapse() {
        assert_eq!(
            build_keys("x", Some("shared")),
            vec!["shared/x.md".to_string(), "x.md".to_string()]
        );
    }

    #[test]
    fn nested_slugs_keep_their_slashes() {
        let keys = build_keys("topics/rust", Some("a.example"));
        assert_eq!(keys[0], "a.example/topics/rust.md");
        assert_eq!(keys[2], "topics/rust.md");
    }
}
