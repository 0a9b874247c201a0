//! Access log format module
//!
//! One line per request in `combined`, `common` or `json` form.

use chrono::{DateTime, Local};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{HeaderMap, Method, Uri, Version};
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::AccessLogFormat;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log entry containing request/response information
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Local>,
    pub method: String,
    /// Path plus query string, as requested
    pub uri: String,
    pub http_version: &'static str,
    pub status: u16,
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Capture the request side; status and size are filled in by [`Self::finish`]
    pub fn start(
        remote_addr: SocketAddr,
        method: &Method,
        uri: &Uri,
        version: Version,
        headers: &HeaderMap,
    ) -> Self {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            remote_addr: remote_addr.ip().to_string(),
            time: Local::now(),
            method: method.to_string(),
            uri: uri
                .path_and_query()
                .map_or_else(|| uri.path().to_string(), ToString::to_string),
            http_version: version_label(version),
            status: 0,
            body_bytes: 0,
            referer: header(REFERER),
            user_agent: header(USER_AGENT),
            request_time_us: 0,
        }
    }

    pub fn finish(&mut self, status: u16, body_bytes: u64, elapsed: Duration) {
        self.status = status;
        self.body_bytes = body_bytes;
        self.request_time_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    }

    pub fn format(&self, format: AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Combined => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            AccessLogFormat::Common => self.format_common(),
            AccessLogFormat::Json => serde_json::to_string(self).unwrap_or_else(|e| {
                format!(r#"{{"error":"unserializable access log entry: {e}"}}"#)
            }),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.method,
            self.uri,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn serialize_time<S: serde::Serializer>(time: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn create_test_entry() -> AccessLogEntry {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(REFERER, HeaderValue::from_static("http://localhost:5001/"));

        let uri: Uri = "/terms?lang=zh".parse().unwrap();
        let mut entry = AccessLogEntry::start(
            "192.168.1.1:50000".parse().unwrap(),
            &Method::GET,
            &uri,
            Version::HTTP_11,
            &headers,
        );
        entry.finish(200, 1234, Duration::from_micros(1500));
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format(AccessLogFormat::Combined);
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.contains("\"GET /terms?lang=zh HTTP/1.1\" 200 1234"));
        assert!(log.ends_with("\"http://localhost:5001/\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format(AccessLogFormat::Common);
        assert!(log.contains("\"GET /terms?lang=zh HTTP/1.1\" 200 1234"));
        assert!(!log.contains("Mozilla"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format(AccessLogFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&log).expect("valid json");
        assert_eq!(value["remote_addr"], "192.168.1.1");
        assert_eq!(value["uri"], "/terms?lang=zh");
        assert_eq!(value["status"], 200);
        assert_eq!(value["request_time_us"], 1500);
        assert_eq!(value["user_agent"], "Mozilla/5.0");
    }
}
