//! Shared infrastructure for the airroute HTTP service.
//!
//! This crate provides the HTTP glue around `airroute-lib`:
//!
//! - [`AppState`]: pre-loaded airport directory and distance engine
//! - [`health`]: liveness/readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request tracking and metrics middleware
//! - Request types with validation
//!
//! Handlers stay thin: parse and validate the request, call `airroute-lib`,
//! format the response. All business logic lives in the library crate.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_distance_calculated, record_distance_failed,
    record_fallback_used, record_route_legs, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_AIRPORT,
};
pub use request::{DistanceRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
