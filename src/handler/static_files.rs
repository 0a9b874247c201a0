//! Static file serving module
//!
//! Serves the entry page and the front-end assets beneath the static root.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// `GET /`: the entry page
pub async fn serve_index(index_file: &Path) -> Response<Full<Bytes>> {
    match fs::read(index_file).await {
        Ok(content) => http::build_html_response(content),
        Err(e) => {
            tracing::error!("Failed to read index page '{}': {e}", index_file.display());
            http::build_404_response()
        }
    }
}

/// `GET /{filename}`: an asset beneath `static_dir`
pub async fn serve_asset(ctx: &RequestContext<'_>, static_dir: &Path) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_asset(static_dir, ctx.path).await else {
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to read file '{}': {e}", file_path.display());
            return http::build_404_response();
        }
    };

    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(ctx.if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    http::build_asset_response(content, content_type, &etag)
}

/// Map a request path onto a regular file inside `static_dir`.
///
/// Returns `None` when the file does not exist, is not a regular file, or
/// resolves (through `..` or symlinks) outside the static root.
pub async fn resolve_asset(static_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }

    let static_root = match fs::canonicalize(static_dir).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(
                "Static directory not found or inaccessible '{}': {e}",
                static_dir.display()
            );
            return None;
        }
    };

    // Missing files are the common 404 case, not worth a warning
    let candidate = fs::canonicalize(static_root.join(relative)).await.ok()?;
    if !candidate.starts_with(&static_root) {
        tracing::warn!(
            "Path traversal attempt blocked: {request_path} -> {}",
            candidate.display()
        );
        return None;
    }

    let metadata = fs::metadata(&candidate).await.ok()?;
    metadata.is_file().then_some(candidate)
}
