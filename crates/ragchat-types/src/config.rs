//! Client configuration types for ragchat.
//!
//! `ClientConfig` represents `config.toml` in the data directory: where the
//! chat endpoint lives, how long to wait for it, how often to autosave, and
//! how to log.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.ragchat/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the chat endpoint (`POST`).
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Seconds between periodic history saves.
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_endpoint_url() -> String {
    "http://127.0.0.1:5000/chat".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_autosave_interval_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Request timeout, never below one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Autosave period, never below one second.
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs.max(1))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_timeout_secs: default_request_timeout_secs(),
            autosave_interval_secs: default_autosave_interval_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint_url, "http://127.0.0.1:5000/chat");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.autosave_interval_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.otel);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
endpoint_url = "https://chat.example.com/chat"
request_timeout_secs = 10
autosave_interval_secs = 5

[logging]
format = "json"
otel = true
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint_url, "https://chat.example.com/chat");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.autosave_interval(), Duration::from_secs(5));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.otel);
    }

    #[test]
    fn test_durations_have_floor() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            autosave_interval_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
        assert_eq!(config.autosave_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::default().to_string(), "pretty");
    }
}
