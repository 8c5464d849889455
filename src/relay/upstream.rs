//! Upstream feed client.
//!
//! # Responsibilities
//! - Own the outbound HTTP client and the upstream configuration
//! - Issue exactly one GET per relayed request
//! - Read the full body before reporting success, without re-encoding it
//! - Turn every failure into a message that is safe to show callers
//!
//! # Design Decisions
//! - No retries; the first outcome is final
//! - Non-2xx upstream statuses are failures, with no status translation
//! - Error text never contains the request URL or the access code

use axum::body::Bytes;
use std::error::Error as _;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::relay::route::RouteSpec;

/// Errors from a single upstream fetch.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// URL could not be built from the configured host and port.
    #[error("invalid upstream address: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP client itself could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Client(String),

    /// Connection, DNS, timeout or body read failure.
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),
}

/// Outcome of relaying one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResult {
    Success {
        content_type: &'static str,
        body: Bytes,
    },
    Failure {
        /// Fixed per-route label.
        message: &'static str,
        /// Underlying failure, scrubbed of the access code.
        cause: String,
    },
}

impl RelayResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayResult::Success { .. })
    }
}

/// Client for the game-server feed.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a client for `config`. Timeouts left unset keep reqwest's defaults.
    pub fn new(config: UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.upstream_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Client(describe(e)))?;

        Ok(Self { http, config })
    }

    /// The upstream host, for diagnostics. Never the access code.
    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Fetch the resource behind `route` and package it for the caller.
    pub async fn relay(&self, route: &RouteSpec) -> RelayResult {
        let start = Instant::now();
        let outcome = self.fetch(route).await;
        let elapsed = start.elapsed();
        metrics::record_upstream(route.path, outcome.is_ok(), elapsed);

        match outcome {
            Ok(body) => {
                tracing::debug!(
                    route = route.path,
                    bytes = body.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Upstream fetch succeeded"
                );
                RelayResult::Success {
                    content_type: route.response_kind.content_type(),
                    body,
                }
            }
            Err(e) => {
                let cause = self.scrub(&e.to_string());
                tracing::error!(route = route.path, error = %cause, "{}", route.error_label);
                RelayResult::Failure {
                    message: route.error_label,
                    cause,
                }
            }
        }
    }

    /// Issue the GET and read the whole body.
    pub async fn fetch(&self, route: &RouteSpec) -> Result<Bytes, UpstreamError> {
        let url = route.upstream_url(&self.config)?;
        tracing::debug!(
            route = route.path,
            upstream_file = route.upstream_file,
            "Fetching from upstream"
        );

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        // Bytes for every kind: the declared charset is the client's business.
        response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(describe(e)))
    }

    /// Mask `code=<secret>` (raw or form-encoded) in an error message.
    fn scrub(&self, message: &str) -> String {
        if self.config.secret.is_empty() {
            return message.to_string();
        }
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.config.secret.as_bytes()).collect();

        let mut scrubbed = message.replace(&format!("code={}", self.config.secret), "code=<redacted>");
        if encoded != self.config.secret {
            scrubbed = scrubbed.replace(&format!("code={}", encoded), "code=<redacted>");
        }
        scrubbed
    }
}

/// Render a reqwest error and its source chain without the request URL.
fn describe(err: reqwest::Error) -> String {
    let timed_out = err.is_timeout();
    let err = err.without_url();

    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }

    if timed_out && !detail.contains("timed out") {
        detail.push_str(" (timed out)");
    }
    detail
}
