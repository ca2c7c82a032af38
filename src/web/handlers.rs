//! HTTP handlers.

use crate::web::pages;
use crate::web::router::AppState;
use crate::web::static_files::{http_date, serve_static};
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::net::SocketAddr;

const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

fn html(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE))],
        body.into(),
    )
        .into_response()
}

/// Fixed 400 page.
pub fn bad_request() -> Response {
    html(StatusCode::BAD_REQUEST, pages::render_bad_request())
}

/// 404 page naming the requested path.
pub fn not_found(path: &str) -> Response {
    html(StatusCode::NOT_FOUND, pages::render_not_found(path))
}

/// Temperature page for the latest snapshot.
pub async fn temperature(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot.current();
    let mut response = html(StatusCode::OK, pages::render_temperature(&snapshot));
    if let Ok(value) = HeaderValue::from_str(&http_date(snapshot.observed_at)) {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }
    response
}

/// Greeting page.
pub async fn home(remote: Option<ConnectInfo<SocketAddr>>) -> Response {
    let remote = remote
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    html(StatusCode::OK, pages::render_home(&remote, &Utc::now()))
}

/// Everything not routed explicitly: a static file, or 400 when the request
/// target is not an absolute path.
pub async fn fallback(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path();
    if !path.starts_with('/') {
        return bad_request();
    }

    let if_modified_since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok());
    serve_static(&state.static_root, path, if_modified_since).await
}
