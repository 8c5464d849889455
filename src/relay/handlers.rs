//! Route handlers.
//!
//! One handler per exposed route. Each relay handler does a single upstream
//! fetch through the shared [`UpstreamClient`](crate::relay::UpstreamClient)
//! and returns the [`RelayResult`]; the HTTP mapping lives in
//! `http::response`.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::route::{RouteSpec, CAREER, ECONOMY, MAP_IMAGE, ROUTES, STATUS, VEHICLES};
use crate::relay::upstream::RelayResult;

pub const HEALTH_MESSAGE: &str = "FS22 Data Proxy is running successfully!";

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthPayload {
    pub message: &'static str,
    pub endpoints: Vec<&'static str>,
    /// Upstream host, only when `expose_upstream_host` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_ip_check: Option<String>,
}

impl HealthPayload {
    pub fn new(upstream_host: Option<&str>) -> Self {
        Self {
            message: HEALTH_MESSAGE,
            endpoints: ROUTES.iter().map(|r| r.path).collect(),
            server_ip_check: upstream_host.map(str::to_string),
        }
    }
}

/// `GET /`: liveness plus the route list. Never touches the upstream.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthPayload> {
    metrics::record_request("/", 200);
    Json(state.health.as_ref().clone())
}

/// `GET /status`: server stats XML.
pub async fn get_status(State(state): State<AppState>) -> RelayResult {
    relay(&state, STATUS).await
}

/// `GET /vehicles`: vehicle positions XML.
pub async fn get_vehicles(State(state): State<AppState>) -> RelayResult {
    relay(&state, VEHICLES).await
}

/// `GET /career`: career savegame XML.
pub async fn get_career(State(state): State<AppState>) -> RelayResult {
    relay(&state, CAREER).await
}

/// `GET /economy`: economy XML.
pub async fn get_economy(State(state): State<AppState>) -> RelayResult {
    relay(&state, ECONOMY).await
}

/// `GET /mapimage`: map JPEG.
pub async fn get_map_image(State(state): State<AppState>) -> RelayResult {
    relay(&state, MAP_IMAGE).await
}

async fn relay(state: &AppState, route: RouteSpec) -> RelayResult {
    let result = state.upstream.relay(&route).await;
    metrics::record_request(route.path, if result.is_success() { 200 } else { 500 });
    result
}
