//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, then CORS and HEAD handling on the way out.

use crate::config::{AppState, HealthConfig};
use crate::handler::{api, static_files};
use crate::http;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, IF_NONE_MATCH};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context for static asset lookups
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub if_none_match: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body so tests can drive it with in-memory bodies.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let is_head = parts.method == Method::HEAD;

    let mut response = route_request(&parts, body, &state).await;

    let http_config = &state.config.http;
    if http_config.enable_cors {
        http::apply_cors(&mut response);
    }
    http::apply_server_name(&mut response, &http_config.server_name);

    if is_head {
        response = http::strip_body(response);
    }
    Ok(response)
}

/// Route request based on method, path and configuration
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = parts.uri.path();

    match parts.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(state.config.http.enable_cors),
        Method::POST if path == api::REPORT_PATH => {
            if let Some(resp) = check_body_size(parts, state.config.http.max_body_size) {
                return resp;
            }
            return api::submit_report(parts, body, state).await;
        }
        _ => {
            tracing::warn!("Method not allowed: {} {path}", parts.method);
            return http::build_405_response();
        }
    }

    if is_health_probe(&state.config.health, path) {
        return http::build_health_response();
    }

    match path {
        "/" => static_files::serve_index(&state.config.paths.index_file).await,
        api::TERMS_PATH => api::list_terms(state).await,
        _ => {
            let ctx = RequestContext {
                path,
                if_none_match: parts
                    .headers
                    .get(IF_NONE_MATCH)
                    .and_then(|v| v.to_str().ok()),
            };
            static_files::serve_asset(&ctx, &state.config.paths.static_dir).await
        }
    }
}

fn is_health_probe(health: &HealthConfig, path: &str) -> bool {
    health.enabled && (path == health.liveness_path || path == health.readiness_path)
}

/// Reject a declared `Content-Length` above the limit before reading the body
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = parts.headers.get(CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        tracing::warn!("Content-Length header contains non-ASCII characters");
        return None;
    };

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            tracing::warn!("Request body too large: {size} bytes (max: {max_body_size})");
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            tracing::warn!("Invalid Content-Length value: '{size_str}', skipping size check");
            None
        }
    }
}
