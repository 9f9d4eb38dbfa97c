//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness check endpoint (checks database and Redis connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "A backing store is unreachable", body = HealthResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if let Err(e) = state.repository.ping().await {
        tracing::warn!(error = %e, "Readiness check: database unreachable");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::new("database unavailable")));
    }
    if let Err(e) = state.services.redis.ping().await {
        tracing::warn!(error = %e, "Readiness check: Redis unreachable");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::new("redis unavailable")));
    }
    (StatusCode::OK, Json(HealthResponse::new("ready")))
}
