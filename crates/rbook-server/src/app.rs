//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::live_reload;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/config", get(handlers::config::get_config))
        .route("/api/sidebar", get(handlers::sidebar::get_sidebar))
        .route("/api/routes", get(handlers::routes::get_routes))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    let mut router = Router::new().merge(api_routes);

    if state.live_reload.is_some() {
        router = router.route("/ws/live-reload", get(live_reload::ws_handler));
    }

    security::apply(router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
