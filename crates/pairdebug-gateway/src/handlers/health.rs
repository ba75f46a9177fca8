//! Liveness and health handlers.

use crate::server::GatewayState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Fixed message returned by `GET /api/test`.
pub const LIVENESS_MESSAGE: &str = "Server is running properly!";

/// `GET /api/test`. Never touches the completion service.
pub async fn liveness_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": LIVENESS_MESSAGE }))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall health status.
    pub status: String,

    /// Server version.
    pub version: String,

    /// Uptime in seconds.
    pub uptime_seconds: u64,

    /// Completion provider name.
    pub provider: String,

    /// Live relay connections.
    pub connections: usize,

    /// Rooms with at least one member.
    pub rooms: usize,
}

/// `GET /health`.
pub async fn health_handler(State(state): State<Arc<GatewayState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        provider: state.debugger.provider_name().to_string(),
        connections: state.relay.connection_count(),
        rooms: state.relay.room_count(),
    })
}
