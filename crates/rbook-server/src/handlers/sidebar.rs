//! Sidebar API endpoint.
//!
//! Returns the navigation tree for the documentation site.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use rbook_nav::SidebarItem;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/sidebar.
#[derive(Serialize)]
pub(crate) struct SidebarResponse {
    /// Top-level sidebar entries.
    items: Vec<SidebarItem>,
}

/// Handle GET /api/sidebar.
pub(crate) async fn get_sidebar(State(state): State<Arc<AppState>>) -> Json<SidebarResponse> {
    let items = state.site.reload_if_needed().tree().sidebar();
    Json(SidebarResponse { items })
}
