//! Shared HTTP infrastructure for the Placefinder service.
//!
//! - [`AppState`]: provider client and post catalog shared by all handlers
//! - [`ServiceConfig`]: environment-driven startup configuration
//! - [`CanonicalQuery`]: extractor yielding the normalized query map
//! - [`ApiResponse`] and [`ValidationRejection`]: handler outcomes
//! - [`ProblemDetails`]: RFC 9457 bodies for non-validation failures
//! - [`health`], [`metrics`], [`logging`], [`middleware`]: probes and observability
//!
//! # Architecture
//!
//! Handlers stay thin; validation and the provider calls live in
//! `placefinder-lib`. This crate only adapts them to HTTP:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract CanonicalQuery                                   │
//! │  - FromQuery::from_params (400 on failure)                  │
//! │  - Call PlacesClient / PostCatalog (502 on fetch failure)   │
//! │  - 200 with the JSON payload                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! Enable the `test-utils` feature for [`test_utils`] from dependent crates.

pub mod config;
mod extract;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use extract::CanonicalQuery;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_provider_failure, record_results_returned,
    record_validation_rejected, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{from_fetch_error, ProblemDetails, PROBLEM_PROVIDER_ERROR};
pub use response::{ApiResponse, ValidationRejection};
pub use state::{AppState, AppStateError};
