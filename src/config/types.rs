//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;

/// File consulted when no config path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Queue capacities and frame limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Log output format.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the startup configuration.
    ///
    /// An explicit path must load. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// loaded if it exists, otherwise built-in defaults are used.
    pub fn resolve(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, used in logs (default: "hubchat").
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

fn default_server_name() -> String {
    "hubchat".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
///
/// The filter comes from `RUST_LOG`; only the output shape is configured here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "hubchat");
        assert_eq!(config.listen.address.port(), 3000);
        assert_eq!(config.limits.hub_queue_capacity, 256);
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn full_file_parses() {
        let config: Config = toml::from_str(
            r#"
[server]
name = "chat.example"

[listen]
address = "127.0.0.1:4000"

[limits]
hub_queue_capacity = 16
sendq_capacity = 32
max_line_len = 1024
max_body_len = 2048

[log]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.server.name, "chat.example");
        assert_eq!(config.listen.address.to_string(), "127.0.0.1:4000");
        assert_eq!(config.limits.hub_queue_capacity, 16);
        assert_eq!(config.limits.sendq_capacity, 32);
        assert_eq!(config.limits.max_line_len, 1024);
        assert_eq!(config.limits.max_body_len, 2048);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(toml::from_str::<Config>("[log]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nname = \"from-disk\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "from-disk");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/hubchat/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nname = 1").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn resolve_explicit_path_must_exist() {
        assert!(Config::resolve(Some("/nonexistent/hubchat/config.toml")).is_err());
    }
}
