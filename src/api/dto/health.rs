//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
