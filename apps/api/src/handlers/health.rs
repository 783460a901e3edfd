//! Liveness probe.

use axum::Json;

use crate::dto::HealthResponse;

/// Reports that the process is up.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
