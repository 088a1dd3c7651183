use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grader_engine::{ClientSettings, DEFAULT_ENDPOINT};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "grader_client.ron";

const DEFAULT_MAX_REPORT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub report_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub max_report_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            report_dir: PathBuf::from("reports"),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("grader.log"),
            connect_timeout_ms: None,
            request_timeout_ms: None,
            max_report_bytes: DEFAULT_MAX_REPORT_BYTES,
        }
    }
}

impl ClientConfig {
    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        grader_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn to_client_settings(&self) -> ClientSettings {
        let mut settings = ClientSettings::with_endpoint(self.endpoint.clone());
        settings.report_dir = self.report_dir.clone();
        settings.connect_timeout = self.connect_timeout_ms.map(Duration::from_millis);
        settings.request_timeout = self.request_timeout_ms.map(Duration::from_millis);
        settings.max_report_bytes = self.max_report_bytes;
        settings
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Loads the client configuration.
///
/// An explicit path must exist. Without one, `grader_client.ron` in the
/// working directory is used if present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let path = explicit.map_or_else(|| PathBuf::from(CONFIG_FILENAME), Path::to_path_buf);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if explicit.is_none() && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.ron");
        fs::write(
            &path,
            r#"(endpoint: "http://grader.test:9000", request_timeout_ms: Some(1500), log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.endpoint, "http://grader.test:9000");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.report_dir, PathBuf::from("reports"));

        let settings = config.to_client_settings();
        assert_eq!(settings.request_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.max_report_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.ron");
        fs::write(&path, "(endpoint: 42").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = ClientConfig {
            log_level: "chatty".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
