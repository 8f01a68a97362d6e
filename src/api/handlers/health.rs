//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// Does not touch storage, so it stays green while the database is down.
///
/// ```json
/// { "ok": true, "version": "0.1.0" }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
