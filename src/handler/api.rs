//! Glossary JSON endpoints
//!
//! Failures from the terms loader and the report sink stop here and become
//! fixed JSON envelopes.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::http::request::Parts;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::report::ReportError;
use crate::terms;

pub const TERMS_PATH: &str = "/terms";
pub const REPORT_PATH: &str = "/report_error";

const TERMS_UNAVAILABLE: &str = "Could not read terms data";
const REPORT_NOT_JSON: &str = "Request must be JSON";
const REPORT_NOT_SAVED: &str = "Could not save report";
const REPORT_SAVED: &str = "Report submitted successfully";

/// `GET /terms`: parse the sheet fresh and return every record in file order
pub async fn list_terms(state: &AppState) -> Response<Full<Bytes>> {
    match terms::load_terms(&state.config.paths.terms_file).await {
        Ok(sheet) => {
            if sheet.is_empty() {
                tracing::warn!("terms sheet has no usable rows");
            }
            tracing::info!(
                records = sheet.len(),
                categories = ?sheet.categories,
                "serving terms"
            );
            http::json_response(StatusCode::OK, &sheet.records)
        }
        Err(e) => {
            tracing::error!("Error reading terms file: {e}");
            http::json_error(StatusCode::INTERNAL_SERVER_ERROR, TERMS_UNAVAILABLE)
        }
    }
}

/// `POST /report_error`: append a JSON-object body to the report log
pub async fn submit_report<B>(parts: &Parts, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if !is_json_request(parts) {
        tracing::warn!("rejected error report without a JSON content type");
        return http::json_error(StatusCode::BAD_REQUEST, REPORT_NOT_JSON);
    }

    let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::warn!("error report body exceeds {limit} bytes");
            return http::build_413_response();
        }
        Err(e) => {
            tracing::warn!("failed to read error report body: {e}");
            return http::json_error(StatusCode::BAD_REQUEST, REPORT_NOT_JSON);
        }
    };

    match state.reports.append(&bytes).await {
        Ok(()) => http::json_message(StatusCode::OK, REPORT_SAVED),
        Err(ReportError::InvalidPayload(reason)) => {
            tracing::warn!("rejected error report: {reason}");
            http::json_error(StatusCode::BAD_REQUEST, REPORT_NOT_JSON)
        }
        Err(e @ ReportError::SinkUnavailable { .. }) => {
            tracing::error!("Error writing error report: {e}");
            http::json_error(StatusCode::INTERNAL_SERVER_ERROR, REPORT_NOT_SAVED)
        }
    }
}

/// `application/json` or any `application/*+json` media type
fn is_json_request(parts: &Parts) -> bool {
    let Some(value) = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
