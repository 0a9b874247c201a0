//! HTTP response building module
//!
//! Builders for the fixed set of responses the glossary server sends.
//! A builder that fails logs the error and falls back to a bare 500.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Methods the server answers on some route
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, "no-cache");
    finish(builder, Bytes::new(), "304")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8");
    finish(builder, Bytes::from_static(b"404 Not Found"), "404")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::ALLOW, ALLOWED_METHODS);
    finish(builder, Bytes::from_static(b"405 Method Not Allowed"), "405")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    json_error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
}

/// Build CORS preflight response
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::ALLOW, ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
            .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
            .header(header::ACCESS_CONTROL_MAX_AGE, "86400");
    }

    finish(builder, Bytes::new(), "OPTIONS")
}

/// Build the entry page response
pub fn build_html_response(content: Vec<u8>) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache");
    finish(builder, Bytes::from(content), "HTML")
}

/// Build static asset response carrying an `ETag`
pub fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    etag: &str,
) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, "no-cache");
    finish(builder, Bytes::from(data), "asset")
}

/// Serialize `body` as a compact JSON response
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => {
            let builder = Response::builder()
                .status(status)
                .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
            finish(builder, Bytes::from(json), status.as_str())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize JSON response");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// `{"error": message}` envelope
pub fn json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
    let body = serde_json::json!({ "error": message }).to_string();
    finish(builder, Bytes::from(body), status.as_str())
}

/// `{"message": message}` envelope
pub fn json_message(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
    let body = serde_json::json!({ "message": message }).to_string();
    finish(builder, Bytes::from(body), status.as_str())
}

/// Liveness/readiness probe response
pub fn build_health_response() -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-store");
    finish(builder, Bytes::from_static(br#"{"status":"ok"}"#), "health")
}

/// Allow any origin to read the response
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
}

/// Stamp the `Server` header, skipping names that are not valid header values
pub fn apply_server_name(response: &mut Response<Full<Bytes>>, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(header::SERVER, value);
    }
}

/// Drop the body for a HEAD request while keeping its `Content-Length`
pub fn strip_body(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (mut parts, body) = response.into_parts();
    if let Some(len) = body.size_hint().exact() {
        parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn finish(builder: Builder, body: Bytes, label: &str) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to build {label} response");
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}
