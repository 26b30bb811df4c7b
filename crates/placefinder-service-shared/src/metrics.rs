//! Prometheus metrics.
//!
//! - [`init_metrics`] installs the global recorder once at startup.
//! - [`metrics_handler`] renders the exposition text for `/metrics`.
//! - `record_*` helpers emit the per-endpoint business metrics.
//!
//! ```no_run
//! use placefinder_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics(&MetricsConfig::from_env()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const METRICS_ENABLED_ENV: &str = "METRICS_ENABLED";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED=false` (any case) disables metrics; they are on otherwise.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup(METRICS_ENABLED_ENV)
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self { enabled }
    }
}

#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the Prometheus recorder.
///
/// Fails if metrics are disabled or a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for `/metrics`.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Count a request rejected by query validation.
pub fn record_validation_rejected(endpoint: &'static str, errors: usize) {
    metrics::counter!(
        "places_validation_rejected_total",
        "endpoint" => endpoint
    )
    .increment(1);
    tracing::debug!(endpoint, errors, "validation rejected");
}

/// Count a failed provider call, labelled by failure kind.
pub fn record_provider_failure(endpoint: &'static str, kind: &'static str) {
    metrics::counter!(
        "places_provider_failures_total",
        "endpoint" => endpoint,
        "kind" => kind
    )
    .increment(1);
}

/// Record how many items a successful call returned.
pub fn record_results_returned(endpoint: &'static str, count: usize) {
    metrics::histogram!(
        "places_results_returned",
        "endpoint" => endpoint
    )
    .record(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_from_lookup() {
        assert!(MetricsConfig::from_lookup(|_| None).enabled);
        assert!(!MetricsConfig::from_lookup(|_| Some("FALSE".to_string())).enabled);
        assert!(MetricsConfig::from_lookup(|_| Some("yes".to_string())).enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let err = init_metrics(&MetricsConfig { enabled: false }).unwrap_err();
        assert!(matches!(err, MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_without_recorder() {
        let output = metrics_handler().await;
        assert!(output.starts_with('#'));
    }

    #[test]
    fn test_business_metrics_without_recorder() {
        record_validation_rejected("places-nearby", 2);
        record_provider_failure("place-details", "status");
        record_results_returned("post-summary-data", 4);
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
