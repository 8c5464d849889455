//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! GET /status | /vehicles | /career | /economy | /mapimage
//!     → handlers.rs (pick the static RouteSpec)
//!     → route.rs (build upstream URL from UpstreamConfig)
//!     → upstream.rs (single GET, full body read)
//!     → RelayResult::Success { content_type, body } | RelayResult::Failure { message, cause }
//!     → http::response (200 with body, or 500 with JSON error)
//! ```
//!
//! # Design Decisions
//! - Route table is static; nothing is mutated at runtime
//! - The upstream client is built once from config and passed in via state
//! - No caching, retries or body transformation

pub mod handlers;
pub mod route;
pub mod upstream;

pub use handlers::HealthPayload;
pub use route::{ResponseKind, RouteSpec, ROUTES};
pub use upstream::{RelayResult, UpstreamClient, UpstreamError};
