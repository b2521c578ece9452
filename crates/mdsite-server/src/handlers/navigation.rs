//! Navigation API endpoint.
//!
//! Returns the sidebar tree and the page served for `/`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use mdsite_site::NavEntry;
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Navigation tree items.
    items: Vec<NavEntry>,
    /// URL path of the default document, if one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    default_path: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigationResponse>, ServerError> {
    let response = tokio::task::spawn_blocking(move || {
        let navigation = state.site.navigation();
        let default_path = state.site.default_document(&navigation).map(to_url_path);
        NavigationResponse {
            items: navigation.entries,
            default_path,
        }
    })
    .await?;

    Ok(Json(response))
}
