// Configuration types module
// Every section falls back to its Default, so a missing config file is valid

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub health: HealthConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; CPU count when unset
    pub workers: Option<usize>,
    /// Listen backlog
    pub backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            workers: None,
            backlog: 128,
        }
    }
}

/// File locations the handlers read from and write to
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// GBK terms sheet, re-read on every `/terms` request
    pub terms_file: PathBuf,
    /// Append-only error report log
    pub report_file: PathBuf,
    /// Root for `GET /{filename}`
    pub static_dir: PathBuf,
    /// Page served for `GET /`
    pub index_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            terms_file: PathBuf::from("audio_termsnull.txt"),
            report_file: PathBuf::from("error_reports.txt"),
            static_dir: PathBuf::from("static"),
            index_file: PathBuf::from("templates/index.html"),
        }
    }
}

/// Access log line format
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessLogFormat {
    /// Apache/Nginx combined format
    #[default]
    Combined,
    /// Common Log Format
    Common,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    pub access_log: bool,
    pub access_log_format: AccessLogFormat,
    /// Log file path (stdout if not set)
    pub log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: AccessLogFormat::default(),
            log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds; the longer of read and write bounds a whole connection
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub server_name: String,
    /// Add `Access-Control-Allow-Origin: *` to every response
    pub enable_cors: bool,
    /// Upper bound for `POST /report_error` bodies, in bytes
    pub max_body_size: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: concat!("glossary-server/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_cors: true,
            max_body_size: 1_048_576,
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub liveness_path: String,
    pub readiness_path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            liveness_path: "/healthz".to_string(),
            readiness_path: "/readyz".to_string(),
        }
    }
}
