//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the API server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, TLS, HTTP/2 limits).
    pub listener: ListenerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Where the served records come from.
    pub data: DataConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Advertise only `h2` over ALPN.
    pub http2_only: bool,

    /// SETTINGS_MAX_CONCURRENT_STREAMS sent to HTTP/2 clients.
    pub max_concurrent_streams: u32,

    /// In-flight request cap across all connections (backpressure).
    pub max_concurrent_requests: usize,

    /// How long in-flight streams may drain after shutdown starts.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            tls: None,
            http2_only: false,
            max_concurrent_streams: 100,
            max_concurrent_requests: 10_000,
            shutdown_grace_secs: 10,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// JSON seed file replacing the built-in records.
    pub seed_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:3001");
        assert_eq!(config.listener.max_concurrent_streams, 100);
        assert!(!config.observability.metrics_enabled);
        assert!(config.data.seed_path.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            http2_only = true

            [listener.tls]
            cert_path = "certs/server.crt"
            key_path = "certs/server.key"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert!(config.listener.http2_only);
        assert_eq!(config.listener.shutdown_grace_secs, 10);
        let tls = config.listener.tls.unwrap();
        assert_eq!(tls.key_path, PathBuf::from("certs/server.key"));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn unknown_log_format_is_a_parse_error() {
        let result: Result<ServerConfig, _> = toml::from_str("[observability]\nlog_format = \"xml\"");
        assert!(result.is_err());
    }
}
