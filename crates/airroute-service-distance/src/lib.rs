//! Router and handlers for the airport distance service.
//!
//! The binary entry point lives in `main.rs`; the router is exposed here so
//! end-to-end tests can drive the handlers without binding a socket.

#![deny(warnings)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use airroute_lib::{
    ConvergenceError, Error as LibError, FallbackObserver, TracingFallbackObserver,
};
use airroute_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_distance_calculated, record_distance_failed, record_fallback_used, record_route_legs,
    AppState, DistanceRequest, MetricsLayer, ProblemDetails, ServiceResponse, Validate,
};

/// Service label used for metrics.
const SERVICE: &str = "distance";

/// Distance response returned to the caller.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    /// Total route distance in kilometers.
    pub distance_km: f64,
    /// Number of consecutive airport pairs summed.
    pub legs: usize,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Success(ServiceResponse<DistanceResponse>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Observer that logs the fallback and counts it in service metrics.
#[derive(Debug, Clone, Copy, Default)]
struct MetricsFallbackObserver;

impl FallbackObserver for MetricsFallbackObserver {
    fn fallback_used(&self, from: &str, to: &str, failure: &ConvergenceError) {
        TracingFallbackObserver.fallback_used(from, to, failure);
        record_fallback_used(SERVICE);
    }
}

/// Build the service router over loaded application state.
pub fn build_router(state: AppState) -> Router {
    let state = state.with_fallback_observer(Arc::new(MetricsFallbackObserver));
    Router::new()
        .route("/api/v1/distance", post(distance_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle POST /api/v1/distance requests.
///
/// The correlation ID is taken from the `X-Request-ID` header when present,
/// so problem responses carry the same ID the request span logs under.
async fn distance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DistanceRequest>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);

    info!(
        request_id = %request_id,
        airports = ?request.airports,
        "handling distance request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_distance_failed("validation_error", SERVICE);
        return Response::Error(*problem);
    }

    let total = match state.engine().calculate_multipart_distance(&request.airports) {
        Ok(total) => total,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "distance computation failed");
            let reason = match &e {
                LibError::UnknownAirport { .. } => "unknown_airport",
                _ => "internal_error",
            };
            record_distance_failed(reason, SERVICE);
            return Response::Error(from_lib_error(&e, request_id.as_str()));
        }
    };

    let legs = request.airports.len().saturating_sub(1);

    record_distance_calculated(SERVICE);
    record_route_legs(legs, SERVICE);

    info!(
        request_id = %request_id,
        distance_km = total,
        legs,
        "distance computed successfully"
    );

    Response::Success(ServiceResponse::new(DistanceResponse {
        distance_km: total,
        legs,
    }))
}
