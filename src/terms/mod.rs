//! Glossary terms module
//!
//! Reads the tab-delimited terms sheet and turns each row into a [`TermRecord`].
//! The sheet is re-read on every call; nothing is cached between requests.

mod loader;
mod record;

use std::path::PathBuf;

pub use loader::load_terms;
pub use record::{TermRecord, TermSheet, DEFAULT_CATEGORY};

/// Errors surfaced by the terms loader
///
/// Malformed rows are never an error; only failing to read the source is.
#[derive(Debug, thiserror::Error)]
pub enum TermsError {
    #[error("terms data unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
