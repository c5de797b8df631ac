//! Route table API endpoint.
//!
//! Returns every routable entry in reading order.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/routes.
#[derive(Serialize)]
pub(crate) struct RoutesResponse {
    routes: Vec<RouteResponse>,
}

/// One route with its breadcrumb title chain (page title last).
#[derive(Serialize)]
struct RouteResponse {
    path: String,
    titles: Vec<String>,
}

/// Handle GET /api/routes.
pub(crate) async fn get_routes(State(state): State<Arc<AppState>>) -> Json<RoutesResponse> {
    let snapshot = state.site.reload_if_needed();
    let routes = snapshot
        .tree()
        .routes()
        .map(|record| RouteResponse {
            path: record.path.to_owned(),
            titles: record.titles.iter().map(|t| (*t).to_owned()).collect(),
        })
        .collect();

    Json(RoutesResponse { routes })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::handlers::test_support::app_state;

    #[tokio::test]
    async fn test_get_routes_in_reading_order() {
        let Json(response) = get_routes(State(app_state())).await;

        let paths: Vec<_> = response.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "/docs/introduce/introduce",
                "/docs/enums/enums",
                "/docs/enums/defining-an-enum",
                "/docs/enums/match",
                "/docs/appendix/appendix-a",
            ]
        );
        assert_eq!(response.routes[3].titles, ["枚举", "match控制流"]);
        assert_eq!(response.routes[4].titles, ["附录", "附录A: 关键字"]);
    }
}
