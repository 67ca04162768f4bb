//! Canonical host redirect middleware
//!
//! Requests carrying the bare apex domain in their Host header are
//! 301-redirected to the https www variant. Disabled when no canonical
//! host is configured.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

/// Redirect apex-host requests to `https://www.<apex><uri>`
pub async fn canonical_host_redirect(
    State(canonical): State<Option<String>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(apex) = canonical else {
        return next.run(req).await;
    };

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok());

    if host == Some(apex.as_str()) {
        let location = format!("https://www.{}{}", apex, req.uri());
        debug!(%location, "redirecting apex host request");
        return (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, location)],
        )
            .into_response();
    }

    next.run(req).await
}
