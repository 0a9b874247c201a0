//! Logger module
//!
//! Provides logging for the glossary server:
//! - `tracing` subscriber setup (level filter, stdout or file)
//! - Server lifecycle messages
//! - Access log lines under the `access` target

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AccessLogFormat, Config, LoggingConfig};
use std::io;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` takes precedence
/// over `logging.level`.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid log level '{}': {e}", config.level),
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer::make_writer(config.log_file.as_deref())?)
        .with_ansi(config.log_file.is_none())
        .try_init()
        .map_err(io::Error::other)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Glossary server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Terms sheet: {}", config.paths.terms_file.display());
    tracing::info!("Report log: {}", config.paths.report_file.display());
    tracing::info!("Static root: {}", config.paths.static_dir.display());
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.logging.log_file {
        tracing::info!("Log file: {path}");
    }
    tracing::info!("======================================");
}

pub fn log_connection_rejected(active: usize, max: u64) {
    tracing::warn!("Max connections reached: {active}/{max}. Connection rejected.");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    tracing::debug!("Failed to serve connection: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    tracing::info!(target: "access", "{}", entry.format(format));
}
