//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Values layered over the file, later fields winning over earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides<'a> {
    /// Replaces only the port of `listener.bind_address`.
    pub port: Option<&'a str>,
    /// Replaces the whole bind address.
    pub bind: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

/// Resolve the effective configuration: file (or defaults), then `PORT`,
/// then the command-line `bind` and `log_level`. Validation runs last.
pub fn resolve(
    path: Option<&Path>,
    bind: Option<&str>,
    log_level: Option<&str>,
) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    let port = std::env::var(PORT_ENV).ok();
    apply_overrides(
        &mut config,
        Overrides {
            port: port.as_deref(),
            bind,
            log_level,
        },
    );
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `overrides` in field order.
pub fn apply_overrides(config: &mut ServerConfig, overrides: Overrides<'_>) {
    if let Some(port) = overrides.port.map(str::trim).filter(|p| !p.is_empty()) {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        config.listener.bind_address = format!("{host}:{port}");
    }
    if let Some(bind) = overrides.bind {
        config.listener.bind_address = bind.to_string();
    }
    if let Some(level) = overrides.log_level {
        config.observability.log_level = level.to_string();
    }
}
