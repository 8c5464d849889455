//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all relay handlers
//! - Wire up middleware (CORS, request ID, tracing)
//! - Build the upstream client from config and share it with handlers
//! - Serve on a listener until shutdown

use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::relay::handlers::{
    get_career, get_economy, get_health, get_map_image, get_status, get_vehicles, HealthPayload,
};
use crate::relay::route::{CAREER, ECONOMY, MAP_IMAGE, STATUS, VEHICLES};
use crate::relay::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub health: Arc<HealthPayload>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(config.upstream.clone(), &config.timeouts)?;

        let exposed_host = config
            .observability
            .expose_upstream_host
            .then_some(config.upstream.host.as_str());

        let state = AppState {
            upstream: Arc::new(upstream),
            health: Arc::new(HealthPayload::new(exposed_host)),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(get_health))
            .route(STATUS.path, get(get_status))
            .route(VEHICLES.path, get(get_vehicles))
            .route(CAREER.path, get(get_career))
            .route(ECONOMY.path, get(get_economy))
            .route(MAP_IMAGE.path, get(get_map_image))
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` resolves, then drain
    /// in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream_host = %self.config.upstream.host,
            upstream_port = self.config.upstream.port,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
