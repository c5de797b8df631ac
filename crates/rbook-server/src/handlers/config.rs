//! Config API endpoint.
//!
//! Returns presentation settings for the frontend.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use rbook_config::SiteConfig;

use crate::state::AppState;

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<SiteConfig> {
    Json(SiteConfig::clone(&state.site_config))
}
