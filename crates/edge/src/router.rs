// crates/edge/src/router.rs

use crate::feeds::{self, NoteDump};
use crate::page;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use serve::assemble::{assemble, render_fragment};
use serve::fetch::fetch_raw;
use serve::meta::generate_metadata;
use serve::resolver::{build_keys, resolve_domain};
use serve::store::StoreError;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

/// Raw markdown is cheap to revalidate but should stay hot on shared
/// caches for a day.
const RAW_CACHE: &str = "public, max-age=0, s-maxage=86400";
const FEED_CACHE: &str = "public, max-age=3600, s-maxage=86400";

// ─────────────────────────────────────────────────────────────────────────────
// Router construction
// ─────────────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/n/{*slug}", get(note_route))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/llms.txt", get(llms_txt))
        .route("/llms-full.txt", get(llms_full_txt))
        .route("/robots.txt", get(robots_txt))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct RawParams {
    /// Domain override for the raw endpoint, used by tooling to pull
    /// another domain's copy of a note.
    domain: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Content domain for this request, straight from the Host header.
/// Empty when the request carries no usable host.
fn request_domain(state: &AppState, headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    resolve_domain(
        host,
        &state.settings.site.fallback_domain,
        &state.settings.site.preview_suffix,
    )
}

/// Like [`request_domain`], but never empty: hostless requests get the
/// fallback domain so feeds always have a namespace to list.
fn canonical_domain(state: &AppState, headers: &HeaderMap) -> String {
    let domain = request_domain(state, headers);
    if domain.is_empty() {
        state.settings.site.fallback_domain.clone()
    } else {
        domain
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn storage_unavailable(err: StoreError) -> Response {
    error!(error = %err, "listing failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Storage not available").into_response()
}

fn text_feed(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, FEED_CACHE),
        ],
        body,
    )
        .into_response()
}

/// Domain partials live beside the notes as `<domain>/header.md` and
/// `<domain>/footer.md`. Optional, and never carry sibling links.
async fn partial(state: &AppState, domain: &str, name: &str) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    let keys = vec![format!("{domain}/{name}.md")];
    let raw = fetch_raw(&keys, state.store.as_ref(), state.mirror_ref()).await?;
    Some(render_fragment(&raw, false, &state.renderer))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = request_domain(&state, &headers);
    let keys = build_keys("index", Some(&domain));
    let body = match fetch_raw(&keys, state.store.as_ref(), state.mirror_ref()).await {
        Some(raw) => render_fragment(&raw, true, &state.renderer),
        None => "<p>No notes published here yet.</p>\n".to_string(),
    };

    let site = &state.settings.site.name;
    let meta_html = format!(
        "<meta name=\"description\" content=\"{}\" />\n    <meta name=\"robots\" content=\"index,follow\" />",
        html_escape::encode_double_quoted_attribute(site)
    );
    Html(page::render_page(site, &meta_html, &body)).into_response()
}

#[tracing::instrument(skip_all, fields(slug = %slug))]
async fn note_route(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RawParams>,
    headers: HeaderMap,
) -> Response {
    match slug.strip_suffix(".md") {
        Some(stem) => raw_markdown(&state, stem, params, &headers).await,
        None => note_page(&state, &slug, &headers).await,
    }
}

/// `GET /n/<slug>.md`: the stored markdown, verbatim.
async fn raw_markdown(
    state: &AppState,
    slug: &str,
    params: RawParams,
    headers: &HeaderMap,
) -> Response {
    let domain = params
        .domain
        .unwrap_or_else(|| request_domain(state, headers));
    let keys = build_keys(slug, Some(&domain));
    match fetch_raw(&keys, state.store.as_ref(), state.mirror_ref()).await {
        Some(markdown) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, RAW_CACHE),
            ],
            markdown,
        )
            .into_response(),
        None => not_found(),
    }
}

/// `GET /n/<slug>`: the full note page.
async fn note_page(state: &AppState, slug: &str, headers: &HeaderMap) -> Response {
    let domain = request_domain(state, headers);
    let keys = build_keys(slug, Some(&domain));
    let Some(raw) = fetch_raw(&keys, state.store.as_ref(), state.mirror_ref()).await else {
        return not_found();
    };

    let note = assemble(&raw, slug, &state.renderer);
    if !note.front_matter.matches_domain(&domain) {
        debug!(
            slug,
            owner = ?note.front_matter.domain,
            domain = %domain,
            "note pinned to another domain"
        );
        return not_found();
    }

    let meta = generate_metadata(&note.front_matter, slug, &state.settings.site.name);
    let header = partial(state, &domain, "header").await;
    let footer = partial(state, &domain, "footer").await;

    let mut body = String::new();
    if let Some(header) = &header {
        body.push_str(header);
    }
    if !note.has_leading_heading {
        body.push_str(&format!(
            "<h1>{}</h1>\n",
            html_escape::encode_text(&note.title())
        ));
    }
    body.push_str(&note.html);
    if let Some(footer) = &footer {
        body.push_str(footer);
    }

    Html(page::render_page(&meta.title, &page::meta_tags_html(&meta), &body)).into_response()
}

#[tracing::instrument(skip_all)]
async fn sitemap_xml(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = canonical_domain(&state, &headers);
    let origin = format!("https://{domain}");
    match state.store.list(&format!("{domain}/")).await {
        Ok(entries) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
                (header::CACHE_CONTROL, FEED_CACHE),
            ],
            feeds::build_sitemap(&origin, &entries, Utc::now()),
        )
            .into_response(),
        Err(err) => storage_unavailable(err),
    }
}

#[tracing::instrument(skip_all)]
async fn llms_txt(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = canonical_domain(&state, &headers);
    let origin = format!("https://{domain}");
    match state.store.list(&format!("{domain}/")).await {
        Ok(entries) => text_feed(feeds::build_llms_txt(
            &state.settings.site.name,
            &origin,
            &entries,
        )),
        Err(err) => storage_unavailable(err),
    }
}

#[tracing::instrument(skip_all)]
async fn llms_full_txt(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = canonical_domain(&state, &headers);
    let entries = match state.store.list(&format!("{domain}/")).await {
        Ok(entries) => entries,
        Err(err) => return storage_unavailable(err),
    };

    let mut notes = Vec::new();
    for entry in entries.iter().filter(|entry| feeds::is_note_key(&entry.key)) {
        let body = match state.store.get(&entry.key).await {
            Ok(Some(bytes)) => String::from_utf8(bytes.to_vec()).ok(),
            Ok(None) => None,
            Err(err) => {
                warn!(key = %entry.key, error = %err, "export fetch failed");
                None
            }
        };
        notes.push(NoteDump {
            key: entry.key.clone(),
            slug: feeds::note_slug(&entry.key),
            body,
        });
    }
    text_feed(feeds::build_llms_full(&state.settings.site.name, &notes))
}

#[tracing::instrument(skip_all)]
async fn robots_txt(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = canonical_domain(&state, &headers);
    text_feed(feeds::build_robots(&format!("https://{domain}")))
}

async fn fallback() -> Response {
    not_found()
}
