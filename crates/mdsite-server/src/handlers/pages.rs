//! Document pages.
//!
//! Each request walks the content tree, resolves the active document,
//! renders it into the article cache and wraps the artifact in the layout.
//! Filesystem work runs on the blocking pool; a client that disconnects does
//! not cancel it, so an artifact write in progress always completes.

use std::sync::Arc;

use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};
use mdsite_site::{NavEntry, resolve_active};

use crate::error::ServerError;
use crate::layout::{PageView, render_page};
use crate::state::AppState;

/// Everything the layout needs, gathered off the async runtime.
struct PreparedPage {
    entries: Vec<NavEntry>,
    active: String,
    article: String,
}

/// Handle GET /.
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    serve_page("/".to_owned(), state, &headers).await
}

/// Handle GET /{*path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    serve_page(format!("/{path}"), state, &headers).await
}

/// Handle requests no route matched.
///
/// Also serves missing files under `/static`, so every 404 shares one page.
pub(crate) async fn not_found(OriginalUri(uri): OriginalUri) -> ServerError {
    ServerError::PageNotFound(uri.path().to_owned())
}

async fn serve_page(
    request_path: String,
    state: Arc<AppState>,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let worker = Arc::clone(&state);
    let page = tokio::task::spawn_blocking(move || prepare_page(&worker, &request_path)).await??;

    let html = render_page(&PageView {
        site_title: &state.title,
        active: &page.active,
        navigation: &page.entries,
        article: &page.article,
    });

    let etag = compute_etag(&state.version, &html);
    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value.as_bytes() == etag.as_bytes());
    let cache_headers = [
        (header::ETAG, etag),
        (header::CACHE_CONTROL, "no-cache".to_owned()),
    ];

    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, cache_headers).into_response());
    }

    Ok((cache_headers, Html(html)).into_response())
}

/// Build navigation, resolve the active key, render it and read the artifact.
fn prepare_page(state: &AppState, request_path: &str) -> Result<PreparedPage, ServerError> {
    let navigation = state.site.navigation();
    let default = state.site.default_document(&navigation);
    let active = resolve_active(request_path, default).to_owned();

    let artifact = state.site.render(&active, request_path)?;
    let article = std::fs::read_to_string(&artifact)?;

    tracing::debug!(request_path, active = %active, "Serving document");
    Ok(PreparedPage {
        entries: navigation.entries,
        active,
        article,
    })
}

/// Compute `ETag` from version and page content.
///
/// Uses MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
