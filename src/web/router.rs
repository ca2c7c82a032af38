//! Web application router and middleware setup.

use crate::reading::SnapshotReader;
use crate::web::config::WebConfig;
use crate::web::handlers;
use crate::web::static_files::http_date;
use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::any,
    Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use sysinfo::System;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info;

lazy_static::lazy_static! {
    static ref SERVER_SIGNATURE: HeaderValue = {
        let signature = format!(
            "{}/{} / {} {} {} / Raspberry Pi",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            System::name().unwrap_or_else(|| "unknown".to_string()),
            System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            std::env::consts::ARCH,
        );
        HeaderValue::from_str(&signature).unwrap_or_else(|_| {
            HeaderValue::from_static(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        })
    };
}

/// Value of the `Server` response header.
pub fn server_signature() -> HeaderValue {
    SERVER_SIGNATURE.clone()
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: SnapshotReader,
    pub static_root: Arc<PathBuf>,
}

/// Create the axum application.
///
/// `/` and `/temperature` render the temperature page, `/home` the greeting
/// page; every other request goes to the static file server.
pub fn create_app(config: &WebConfig, snapshot: SnapshotReader) -> Router {
    let state = AppState {
        snapshot,
        static_root: Arc::new(config.static_root.clone()),
    };

    Router::new()
        .route("/", any(handlers::temperature))
        .route("/temperature", any(handlers::temperature))
        .route("/home", any(handlers::home))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::SERVER,
                    server_signature(),
                ))
                .layer(middleware::from_fn(access_log)),
        )
}

fn header_or_placeholder(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

/// Format one access log line: remote address, status, request line,
/// user agent, accepted languages and referer, separated by tabs.
pub fn access_line(
    remote: Option<SocketAddr>,
    status: StatusCode,
    method: &Method,
    target: &str,
    headers: &HeaderMap,
) -> String {
    let remote = remote
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{}\t{}\t\"{} {}\"\t\"{}\"\t\"{}\"\t\"{}\"",
        remote,
        status.as_u16(),
        method,
        target,
        header_or_placeholder(headers, header::USER_AGENT),
        header_or_placeholder(headers, header::ACCEPT_LANGUAGE),
        header_or_placeholder(headers, header::REFERER),
    )
}

/// One access log line per request, and a `Date` header on every response.
async fn access_log(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().to_string());
    let headers = request.headers().clone();

    let mut response = next.run(request).await;

    if !response.headers().contains_key(header::DATE) {
        if let Ok(value) = HeaderValue::from_str(&http_date(Utc::now())) {
            response.headers_mut().insert(header::DATE, value);
        }
    }

    info!(
        target: "access",
        "{}",
        access_line(remote, response.status(), &method, &target, &headers)
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_line_with_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB"));
        headers.insert(header::REFERER, HeaderValue::from_static("http://pi/home"));
        let remote: SocketAddr = "192.168.1.20:51234".parse().unwrap();

        let line = access_line(
            Some(remote),
            StatusCode::OK,
            &Method::GET,
            "/temperature?x=1",
            &headers,
        );

        assert_eq!(
            line,
            "192.168.1.20\t200\t\"GET /temperature?x=1\"\t\"curl/8.0\"\t\"en-GB\"\t\"http://pi/home\""
        );
    }

    #[test]
    fn test_access_line_missing_values_use_placeholder() {
        let line = access_line(
            None,
            StatusCode::NOT_FOUND,
            &Method::GET,
            "/nofile.xyz",
            &HeaderMap::new(),
        );

        assert_eq!(line, "-\t404\t\"GET /nofile.xyz\"\t\"-\"\t\"-\"\t\"-\"");
        assert_eq!(line.split('\t').count(), 6);
    }

    #[test]
    fn test_access_line_for_asterisk_target() {
        let line = access_line(
            None,
            StatusCode::BAD_REQUEST,
            &Method::OPTIONS,
            "*",
            &HeaderMap::new(),
        );

        assert!(line.starts_with("-\t400\t\"OPTIONS *\""));
    }
}
