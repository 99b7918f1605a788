//! Health check handlers
//!
//! Provides health and readiness endpoints for monitoring and orchestration.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status: "ok" or "degraded"
    #[schema(example = "ok")]
    pub status: &'static str,
    /// Server version from Cargo.toml
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// Service name
    #[schema(example = "vpm-server")]
    pub service: &'static str,
    /// Product store backend ("memory" or "postgres")
    #[schema(example = "memory")]
    pub store: &'static str,
}

/// Service health
///
/// Returns JSON with service status, version, and the product store backend.
/// The status is "degraded" when the product store cannot be reached.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.engine.store();

    let status = match store.check_health().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, backend = store.backend_name(), "Product store health check failed");
            "degraded"
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        service: "vpm-server",
        store: store.backend_name(),
    })
}

/// Readiness response for orchestrators
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Whether the service is ready to accept traffic
    pub ready: bool,
}

/// Readiness probe
///
/// Returns 200 once the router is serving. Unlike /health, this does not
/// touch the product store.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses((status = 200, description = "Service is ready", body = ReadyResponse))
)]
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}
