//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{LogFormat, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Upstream host (IP or hostname). Required.
pub const SERVER_IP_ENV: &str = "FS22_SERVER_IP";
/// Upstream web port. Required.
pub const SERVER_PORT_ENV: &str = "FS22_PORT";
/// Upstream access code. Required.
pub const SECRET_CODE_ENV: &str = "FS22_SECRET_CODE";
/// Listen port override.
pub const LISTEN_PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "RELAY_LOG_FORMAT";
pub const METRICS_ADDRESS_ENV: &str = "RELAY_METRICS_ADDRESS";
pub const EXPOSE_HOST_ENV: &str = "RELAY_EXPOSE_UPSTREAM_HOST";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, then apply environment
/// overrides read through `lookup`, then validate.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RelayConfig::default(),
    };

    apply_env(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration using the process environment.
pub fn load_from_env(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    load_config(path, |var| std::env::var(var).ok())
}

fn apply_env<F>(config: &mut RelayConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Blank values count as unset so `FS22_SECRET_CODE=` still fails validation.
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(SERVER_IP_ENV) {
        config.upstream.host = host.trim().to_string();
    }
    if let Some(port) = get(SERVER_PORT_ENV) {
        config.upstream.port = parse_port(SERVER_PORT_ENV, &port)?;
    }
    if let Some(secret) = get(SECRET_CODE_ENV) {
        config.upstream.secret = secret;
    }
    if let Some(port) = get(LISTEN_PORT_ENV) {
        config.listener.port = parse_port(LISTEN_PORT_ENV, &port)?;
    }
    if let Some(format) = get(LOG_FORMAT_ENV) {
        config.observability.log_format = match format.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnv {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected 'pretty' or 'json', got '{}'", other),
                })
            }
        };
    }
    if let Some(addr) = get(METRICS_ADDRESS_ENV) {
        config.observability.metrics_address = Some(addr.trim().to_string());
    }
    if let Some(flag) = get(EXPOSE_HOST_ENV) {
        config.observability.expose_upstream_host =
            flag.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: EXPOSE_HOST_ENV,
                reason: format!("expected 'true' or 'false', got '{}'", flag.trim()),
            })?;
    }

    Ok(())
}

fn parse_port(var: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidEnv {
        var,
        reason: format!("'{}' is not a port number ({})", raw.trim(), e),
    })
}
