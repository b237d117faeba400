//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of network nodes loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,

    /// Number of hospitals loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospitals_loaded: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            hospitals_loaded: None,
        }
    }

    /// Create a ready status with network information.
    pub fn ready(service: &str, version: &str, nodes: usize, hospitals: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: Some(nodes),
            hospitals_loaded: Some(hospitals),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            hospitals_loaded: None,
        }
    }
}

/// Liveness probe handler. Does not depend on loaded data.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler. Checks that the network snapshot is non-empty.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let network = state.network();
    if network.nodes.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no network loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        network.nodes.len(),
        network.hospitals.len(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
