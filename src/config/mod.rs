// Configuration module entry point
// Loads layered configuration and builds the state shared by request handlers

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{AccessLogFormat, Config, HealthConfig, LoggingConfig};

/// Environment variable prefix, e.g. `GLOSSARY_SERVER__PORT=8080`
const ENV_PREFIX: &str = "GLOSSARY";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// The file is optional; environment variables override it and built-in
    /// defaults fill anything neither sets.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/glossary").expect("defaults");
        assert!(cfg.http.enable_cors);
        assert_eq!(cfg.health.liveness_path, "/healthz");
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::Combined);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glossary.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 6100
workers = 2

[paths]
terms_file = "data/terms.txt"

[logging]
access_log_format = "json"
"#,
        )
        .expect("write config");

        let cfg = Config::load_from(path.to_str().expect("utf-8 path")).expect("load");
        assert_eq!(cfg.server.port, 6100);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.paths.terms_file, Path::new("data/terms.txt"));
        assert_eq!(cfg.paths.report_file, Path::new("error_reports.txt"));
        assert_eq!(cfg.logging.access_log_format, AccessLogFormat::Json);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "0.0.0.0".to_string();
        cfg.server.port = 5001;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 5001);

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
