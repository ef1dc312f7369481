// ABOUTME: Configuration loading for watchparty.
// ABOUTME: Reads ~/.watchparty/config.toml; CLI flags and env override it in main.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::poller::DEFAULT_POLL_INTERVAL;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub poll: PollConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Chat server connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

/// Message polling cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl PollConfig {
    /// Poll interval, never below 50ms.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(50))
    }
}

/// Where the session key/value store lives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load config from ~/.watchparty/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Directory holding config, storage, and logs.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".watchparty")
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Path to the local storage file.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage.path {
            Some(path) => expand_home(path),
            None => Self::config_dir().join("storage.json"),
        }
    }

    /// Path to the log file.
    pub fn log_path(&self) -> PathBuf {
        match &self.log.file {
            Some(path) => expand_home(path),
            None => Self::config_dir().join("watchparty.log"),
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.poll.interval(), Duration::from_millis(500));
        assert_eq!(config.log.level, "info");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
[server]
base_url = "https://chat.example.com"

[poll]
interval_ms = 2000

[storage]
path = "/tmp/wp/storage.json"

[log]
level = "debug"
file = "/tmp/wp/wp.log"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://chat.example.com");
        assert_eq!(config.poll.interval(), Duration::from_secs(2));
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/wp/storage.json"));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/wp/wp.log"));
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let toml_str = r#"
[poll]
interval_ms = 250
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.poll.interval_ms, 250);
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert!(config.storage_path().ends_with("storage.json"));
    }

    #[test]
    fn tiny_interval_is_floored() {
        let config: Config = toml::from_str("[poll]\ninterval_ms = 0\n").unwrap();
        assert_eq!(config.poll.interval(), Duration::from_millis(50));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.poll.interval_ms, 500);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://h:1\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "http://h:1");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config: Config = toml::from_str("[storage]\npath = \"~/x/s.json\"\n").unwrap();
        assert_eq!(config.storage_path(), home.join("x/s.json"));
    }
}
