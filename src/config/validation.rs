//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect required upstream settings that were never supplied
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::loader::{SECRET_CODE_ENV, SERVER_IP_ENV, SERVER_PORT_ENV};
use crate::config::schema::RelayConfig;
use crate::relay::route::feed_base_url;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required setting was not provided by any source.
    #[error("{field} is missing (set {env_var})")]
    Missing {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    /// Host and port do not form a usable feed URL.
    #[error("upstream.host '{host}' is not a valid address ({reason})")]
    InvalidHost { host: String, reason: String },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a loaded configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.host.trim().is_empty() {
        errors.push(ValidationError::Missing {
            field: "upstream.host",
            env_var: SERVER_IP_ENV,
        });
    }
    if config.upstream.port == 0 {
        errors.push(ValidationError::Missing {
            field: "upstream.port",
            env_var: SERVER_PORT_ENV,
        });
    }
    if config.upstream.secret.is_empty() {
        errors.push(ValidationError::Missing {
            field: "upstream.secret",
            env_var: SECRET_CODE_ENV,
        });
    }

    if errors.is_empty() {
        if let Err(e) = feed_base_url(&config.upstream) {
            errors.push(ValidationError::InvalidHost {
                host: config.upstream.host.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "timeouts.connect_secs",
        });
    }
    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "timeouts.upstream_secs",
        });
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::MetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
