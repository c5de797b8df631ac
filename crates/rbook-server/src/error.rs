//! Error types for the HTTP server.

use std::net::AddrParseError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rbook_nav::RouteNotFound;
use rbook_site::{SiteError, SourceError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No sidebar entry has the requested route.
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFound),

    /// Initial sidebar load failed.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Sidebar file cannot be used as a source.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// File watcher could not be started.
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Host and port do not form a socket address.
    #[error("Invalid listen address: {0}")]
    Address(#[from] AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::RouteNotFound(e) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Route not found", "path": e.path}),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": self.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
