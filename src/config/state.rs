// Application state module
// Everything a request handler needs, built once at startup

use super::types::Config;
use crate::report::ReportSink;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Shared so concurrent report appends serialize on one lock
    pub reports: ReportSink,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let reports = ReportSink::new(config.paths.report_file.clone());
        Self { config, reports }
    }
}
