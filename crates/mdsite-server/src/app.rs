//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `assets_dir` - Directory served under `/static`
pub(crate) fn create_router(state: Arc<AppState>, assets_dir: &Path) -> Router {
    let api_routes = Router::new().route("/api/navigation", get(handlers::navigation::get_navigation));

    let page_routes = Router::new()
        .route("/", get(handlers::pages::get_root_page))
        .route("/{*path}", get(handlers::pages::get_page));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .nest_service(
            "/static",
            ServeDir::new(assets_dir).not_found_service(handlers::pages::not_found.into_service()),
        )
        .fallback(handlers::pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(security::security_headers()),
        )
        .with_state(state)
}
