//! Health check handlers for liveness and readiness probes.
//!
//! `/health/live` reports that the process is running; `/health/ready`
//! additionally checks that the airport directory is loaded.

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

    /// Number of airports loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports_loaded: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
        }
    }

    /// Create a ready status with directory information.
    pub fn ready(service: &str, version: &str, airports: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: Some(airports),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK whenever the process is running; no external resources are
/// consulted.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK once the airport directory is loaded and non-empty,
/// otherwise 503. A service with an empty directory must not receive traffic.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let airports = state.airports_loaded();
    if airports == 0 {
        let status = HealthStatus::not_ready(service, version, "no airports loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, airports);
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert!(status.airports_loaded.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("test-service", "1.0.0", 6000);
        assert_eq!(status.status, "ok");
        assert_eq!(status.airports_loaded, Some(6000));
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no airports loaded");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no airports"));
    }

    #[test]
    fn test_health_status_serialization_skips_optional_fields() {
        let status = HealthStatus::alive("distance", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("airports_loaded"));
    }
}
