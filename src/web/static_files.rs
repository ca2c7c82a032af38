//! Static file serving from a single flat directory.
//!
//! Only paths of the form `/<name>.<ext>` are eligible, where `name` is made
//! of ASCII letters, digits, `_` and `-`, and `ext` is two to four ASCII
//! letters. Everything else, including subdirectories, dotfiles and any
//! path containing `..`, is answered exactly like a missing file.

use crate::web::handlers::not_found;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use futures_util::stream;
use std::path::Path;
use std::time::SystemTime;
use tokio_util::io::ReaderStream;
use tracing::debug;

const CACHE_CONTROL: &str = "public, max-age=86400";

/// Whether a request path may be mapped onto the file system at all.
pub fn is_servable_path(path: &str) -> bool {
    if path.contains("..") {
        return false;
    }
    let Some(file_name) = path.strip_prefix('/') else {
        return false;
    };
    let Some((name, ext)) = file_name.rsplit_once('.') else {
        return false;
    };

    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        && (2..=4).contains(&ext.len())
        && ext.bytes().all(|b| b.is_ascii_alphabetic())
}

/// MIME type for a file extension, `application/octet-stream` if unknown.
pub fn mime_for(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "css" => "text/css",
        "html" => "text/html",
        "ico" => "image/x-icon",
        "jpg" => "image/jpeg",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "txt" => "text/plain",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

/// HTTP-date, e.g. `Tue, 05 Mar 2024 10:20:30 GMT`.
pub fn http_date(time: impl Into<DateTime<Utc>>) -> String {
    time.into().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Serve `request_path` from `root`.
///
/// A 304 is returned when `if_modified_since` equals the file's
/// `Last-Modified` value character for character.
pub async fn serve_static(
    root: &Path,
    request_path: &str,
    if_modified_since: Option<&str>,
) -> Response {
    if !is_servable_path(request_path) {
        debug!("Rejected static path {:?}", request_path);
        return not_found(request_path);
    }

    let file_name = request_path.trim_start_matches('/');
    let full_path = root.join(file_name);

    let metadata = match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return not_found(request_path),
        Err(e) => {
            debug!("Cannot stat {}: {}", full_path.display(), e);
            return not_found(request_path);
        }
    };

    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    let modified = http_date(metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime_for(ext)));

    if if_modified_since == Some(modified.as_str()) {
        // An unsized empty body keeps a Content-Length header off the 304.
        let empty = stream::empty::<Result<Bytes, std::io::Error>>();
        return (StatusCode::NOT_MODIFIED, headers, Body::from_stream(empty)).into_response();
    }

    let file = match tokio::fs::File::open(&full_path).await {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {}: {}", full_path.display(), e);
            return not_found(request_path);
        }
    };

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    if let Ok(value) = HeaderValue::from_str(&modified) {
        headers.insert(header::LAST_MODIFIED, value);
    }

    let body = Body::from_stream(ReaderStream::new(file));
    (StatusCode::OK, headers, body).into_response()
}
