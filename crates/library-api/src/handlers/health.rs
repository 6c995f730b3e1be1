//! Health check handlers
//!
//! Endpoints for liveness and readiness probes. These are the only routes
//! that use HTTP status codes to signal state.

use axum::{extract::State, http::StatusCode, Json};
use library_service::dto::{HealthResponse, ReadinessResponse};
use library_service::StateService;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check: database reachable and state registry seeded
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (db_healthy, registry_seeded) = match StateService::new(state.service_context()).is_seeded().await {
        Ok(seeded) => (true, seeded),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe could not read the state registry");
            (false, false)
        }
    };

    let response = ReadinessResponse::ready(db_healthy, registry_seeded);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
