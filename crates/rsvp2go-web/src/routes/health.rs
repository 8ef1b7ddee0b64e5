//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handle `GET /health`.
///
/// Does not touch the store; a healthy answer only means the process serves.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "rsvp2go",
        version: env!("CARGO_PKG_VERSION"),
    })
}
