//! Prometheus metrics infrastructure.
//!
//! This module provides:
//! - [`MetricsConfig`]: configuration for the metrics system
//! - [`init_metrics`]: initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: axum handler for `GET /metrics`
//! - Business metric helpers for the distance service

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once at application startup before any metrics are
/// recorded; subsequent calls return an error.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if [`init_metrics`] has not been called.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a successful route distance calculation.
///
/// Increments the `airroute_distances_calculated_total` counter.
pub fn record_distance_calculated(service: &str) {
    metrics::counter!(
        "airroute_distances_calculated_total",
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record a failed distance calculation.
///
/// Increments the `airroute_distances_failed_total` counter.
///
/// # Arguments
///
/// * `reason` - failure reason (e.g., "unknown_airport", "validation_error")
/// * `service` - the service name (e.g., "distance")
pub fn record_distance_failed(reason: &str, service: &str) {
    metrics::counter!(
        "airroute_distances_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record the number of legs in a successful route.
///
/// Records to the `airroute_route_legs` histogram.
pub fn record_route_legs(legs: usize, service: &str) {
    metrics::histogram!(
        "airroute_route_legs",
        "service" => service.to_string()
    )
    .record(legs as f64);
}

/// Record a substitution of the spherical fallback for the ellipsoidal
/// algorithm.
///
/// Increments the `airroute_geodesic_fallbacks_total` counter.
pub fn record_fallback_used(service: &str) {
    metrics::counter!(
        "airroute_geodesic_fallbacks_total",
        "service" => service.to_string()
    )
    .increment(1);
}
