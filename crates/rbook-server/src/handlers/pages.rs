//! Pages API endpoint.
//!
//! Resolves a route against the sidebar and returns its place in the book:
//! breadcrumbs, previous/next links, and the markdown document behind it.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use rbook_nav::{Breadcrumb, RouteLink};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageResponse {
    title: String,
    path: String,
    breadcrumbs: Vec<Breadcrumb>,
    prev: Option<RouteLink>,
    next: Option<RouteLink>,
    /// Markdown document relative to the source directory.
    source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_link: Option<String>,
}

/// Handle GET /api/pages/ (site root).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PageResponse>, ServerError> {
    get_page_impl("/", &state)
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PageResponse>, ServerError> {
    get_page_impl(&format!("/{path}"), &state)
}

fn get_page_impl(route: &str, state: &AppState) -> Result<Json<PageResponse>, ServerError> {
    let page = state.site.reload_if_needed().page(route)?;
    let edit_link = state.site_config.edit_url(&page.document);

    Ok(Json(PageResponse {
        title: page.title,
        path: page.path,
        breadcrumbs: page.breadcrumbs,
        prev: page.pager.prev,
        next: page.pager.next,
        source_file: page.document,
        edit_link,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::handlers::test_support::app_state;

    #[tokio::test]
    async fn test_get_page() {
        let Json(page) = get_page(Path("docs/enums/match".to_owned()), State(app_state()))
            .await
            .unwrap();

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["title"], "match控制流");
        assert_eq!(json["path"], "/docs/enums/match");
        assert_eq!(json["breadcrumbs"][0]["title"], "枚举");
        assert_eq!(json["prev"]["path"], "/docs/enums/defining-an-enum");
        assert_eq!(json["next"]["path"], "/docs/appendix/appendix-a");
        assert_eq!(json["sourceFile"], "docs/enums/match.md");
        assert_eq!(
            json["editLink"],
            "https://github.com/eveningwater/rust-doc/edit/main/docs/enums/match.md"
        );
    }

    #[tokio::test]
    async fn test_get_first_page_has_no_prev() {
        let Json(page) = get_page(
            Path("docs/introduce/introduce".to_owned()),
            State(app_state()),
        )
        .await
        .unwrap();

        assert_eq!(page.prev, None);
        assert_eq!(page.breadcrumbs, Vec::new());
        assert_eq!(page.next.unwrap().title, "枚举");
    }

    #[tokio::test]
    async fn test_get_page_under_pathless_heading() {
        let Json(page) = get_page(
            Path("docs/appendix/appendix-a".to_owned()),
            State(app_state()),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["breadcrumbs"][0]["title"], "附录");
        assert!(json["breadcrumbs"][0].get("path").is_none());
        assert_eq!(json["next"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_get_page_not_found() {
        let err = get_page(Path("docs/enums/match/".to_owned()), State(app_state()))
            .await
            .unwrap_err();

        assert!(matches!(&err, ServerError::RouteNotFound(e) if e.path == "/docs/enums/match/"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_root_page_not_in_sidebar() {
        let err = get_root_page(State(app_state())).await.unwrap_err();

        assert!(matches!(err, ServerError::RouteNotFound(_)));
    }
}
