//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files;
//! environment overrides are applied on top by the loader.

use serde::Deserialize;
use std::fmt;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// The game-server feed every route fetches from.
    pub upstream: UpstreamConfig,

    /// Timeouts for the outbound call.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port. Overridden by `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` pair handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream feed location and access code.
///
/// Empty strings and port 0 mean "not configured"; validation rejects them.
#[derive(Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Game server address (IP or hostname).
    pub host: String,

    /// Game server web port.
    pub port: u16,

    /// Shared access code sent as the `code` query parameter.
    pub secret: String,
}

// Debug output ends up in logs, so the secret is masked.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Timeout configuration for the outbound call.
///
/// Unset values leave the HTTP client's defaults in place.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total time for the upstream request/response in seconds.
    pub upstream_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Pretty for terminals, JSON for log shippers.
    pub log_format: LogFormat,

    /// Prometheus exporter bind address. Metrics are off when unset.
    pub metrics_address: Option<String>,

    /// Echo the upstream host on the health route.
    pub expose_upstream_host: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_address: None,
            expose_upstream_host: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3000");
        assert!(config.timeouts.upstream_secs.is_none());
        assert!(!config.observability.expose_upstream_host);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_debug_masks_secret() {
        let upstream = UpstreamConfig {
            host: "10.0.0.1".into(),
            port: 9000,
            secret: "abc123".into(),
        };
        let printed = format!("{:?}", upstream);
        assert!(printed.contains("10.0.0.1"));
        assert!(!printed.contains("abc123"));
    }

    #[test]
    fn test_partial_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            host = "192.168.1.20"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.host, "192.168.1.20");
        assert_eq!(config.upstream.port, 0);
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
