//! Error report sink
//!
//! Client-submitted reports are appended to a flat log file, one compact JSON
//! object per record, each followed by a separator line. Key order and number
//! text are kept as the client sent them. Appends are
//! serialized so records from concurrent requests never interleave.

use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Line written after every record
pub const RECORD_SEPARATOR: &str = "---";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid report payload: {0}")]
    InvalidPayload(String),

    #[error("could not append report to {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only report log
#[derive(Debug)]
pub struct ReportSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Validate a request body as a JSON object
    pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ReportError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ReportError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(ReportError::InvalidPayload(e.to_string())),
        }
    }

    /// Validate `body` and append it as one record.
    ///
    /// Nothing is written when the body is not a JSON object.
    pub async fn append(&self, body: &[u8]) -> Result<(), ReportError> {
        let payload = Self::parse_payload(body)?;
        self.write_record(&payload).await
    }

    async fn write_record(&self, payload: &Map<String, Value>) -> Result<(), ReportError> {
        let json = serde_json::to_string(payload)
            .map_err(|e| ReportError::InvalidPayload(e.to_string()))?;
        let record = format!("{json}\n{RECORD_SEPARATOR}\n");

        let _guard = self.write_lock.lock().await;
        self.append_bytes(record.as_bytes())
            .await
            .map_err(|source| ReportError::SinkUnavailable {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            bytes = record.len(),
            "error report saved"
        );
        Ok(())
    }

    async fn append_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_data().await
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
