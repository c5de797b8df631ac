//! Response headers for the JSON API.
//!
//! Every response gets the headers in [`HEADERS`]. Snapshots change on
//! reload, so responses are also marked uncacheable.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Only the live-reload socket may be reached; nothing loads or frames.
const CSP: &str = "default-src 'none'; connect-src 'self' ws: wss:; frame-ancestors 'none'";

/// Header names (lowercase) and values set on every response.
pub(crate) const HEADERS: [(&str, &str); 5] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("cache-control", "no-store"),
];

/// Wrap `router` so every response carries [`HEADERS`], replacing any
/// handler-set value.
pub(crate) fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_apply_sets_every_header() {
        let router = apply(Router::new().route("/", get(|| async { "ok" })));

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        for (name, value) in HEADERS {
            assert_eq!(response.headers()[name], value, "header {name}");
        }
    }

    #[tokio::test]
    async fn test_apply_overrides_handler_cache_control() {
        let handler = || async { ([("cache-control", "max-age=60")], "ok") };
        let router = apply(Router::new().route("/", get(handler)));

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["cache-control"], "no-store");
    }
}
