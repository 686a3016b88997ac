//! Optional RON config file. Command-line flags take precedence over it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use safetyboard_core::SourceKind;
use safetyboard_engine::{FetchSettings, SourceSet};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "safetyboard.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory or base URL the default dataset file names resolve against.
    pub base: String,
    pub trustified: Option<String>,
    pub unbox: Option<String>,
    pub open_data: Option<String>,
    /// terminal, file or both.
    pub log: String,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    /// No deadline when absent.
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: u64,
    pub export_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base: ".".to_string(),
            trustified: None,
            unbox: None,
            open_data: None,
            log: "terminal".to_string(),
            log_level: "info".to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.map(|t| t.as_secs()),
            max_bytes: fetch.max_bytes,
            export_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn source_set(&self) -> SourceSet {
        let mut sources = SourceSet::from_base(&self.base);
        for (kind, location) in [
            (SourceKind::Trustified, &self.trustified),
            (SourceKind::UnboxHealth, &self.unbox),
            (SourceKind::OpenData, &self.open_data),
        ] {
            if let Some(location) = location {
                sources.set_location(kind, location.clone());
            }
        }
        sources
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Reads the config at `path`. A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Option<DashboardConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_none() {
        let temp = TempDir::new().unwrap();
        let loaded = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(base: "https://data.example.com/", open_data: Some("/srv/open.json"), request_timeout_secs: Some(30))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();

        assert_eq!(config.log, "terminal");
        let sources = config.source_set();
        assert_eq!(
            sources.trustified,
            "https://data.example.com/trustified_data.json"
        );
        assert_eq!(sources.open_data, "/srv/open.json");
        assert_eq!(
            config.fetch_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(base: ").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
