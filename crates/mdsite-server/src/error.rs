//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mdsite_site::RenderError;

use crate::layout;

/// Server error type.
///
/// Every variant becomes one of the built-in error pages. Paths and error
/// details are logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No route or document for the request path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Render pipeline failure.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Rendered artifact could not be read back.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Render(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Render(_) | Self::Io(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::PageNotFound(path) => tracing::warn!(path = %path, "No route for request"),
            Self::Render(e) => {
                tracing::error!(request_path = e.request_path(), error = %e, status = status.as_u16(), "Render failed");
            }
            Self::Io(_) | Self::Task(_) => tracing::error!(error = %self, "Request failed"),
        }

        (status, Html(layout::render_error_page(status))).into_response()
    }
}
