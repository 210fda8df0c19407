//! Global calboard configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalboardError, CalboardResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/calboard";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("calboard"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Global configuration at ~/.config/calboard/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CalboardConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CalboardConfig {
    fn default() -> Self {
        CalboardConfig {
            data_dir: default_data_dir(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: default_log_level(),
        }
    }
}

impl CalboardConfig {
    pub fn config_path() -> CalboardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalboardError::Config("Could not determine config directory".into()))?
            .join("calboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> CalboardResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalboardResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CalboardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalboardError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_path().join("events.json")
    }

    pub fn abstracts_path(&self) -> PathBuf {
        self.data_path().join("abstracts.json")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalboardResult<()> {
        let contents = format!(
            "\
# calboard configuration

# Where events and submissions are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Seconds before a store request is abandoned:
# request_timeout_secs = {DEFAULT_REQUEST_TIMEOUT_SECS}

# Log filter when RUST_LOG is unset (error, warn, info, debug, trace):
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalboardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalboardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalboardConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CalboardConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        CalboardConfig::create_default_config(&path).unwrap();

        let config = CalboardConfig::load_from(&path).unwrap();
        assert_eq!(config, CalboardConfig::default());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"~/boards\"\nrequest_timeout_secs = 3\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = CalboardConfig::load_from(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.log_level, "debug");
        assert!(config.events_path().ends_with("boards/events.json"));
        assert!(config.abstracts_path().ends_with("boards/abstracts.json"));
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"\n").unwrap();

        let err = CalboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CalboardError::Config(_)));
    }
}
