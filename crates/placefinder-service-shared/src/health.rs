//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::AppState;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// `ok` or `not_ready: <reason>`.
    pub status: String,
    pub service: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_loaded: Option<usize>,

    /// Host of the nearby-search endpoint the service will call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_host: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            posts_loaded: None,
            provider_host: None,
        }
    }

    pub fn ready(service: &str, version: &str, posts: usize, provider_host: String) -> Self {
        Self {
            posts_loaded: Some(posts),
            provider_host: Some(provider_host),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// `GET /health/live`: 200 while the process is serving.
pub async fn health_live() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::alive(SERVICE, VERSION)))
}

/// `GET /health/ready`: 200 once the provider endpoint is usable.
///
/// An empty post catalog is reported but does not fail readiness; the
/// places routes work without it.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"placefinder-service-shared","version":"0.1.0","posts_loaded":12,"provider_host":"maps.googleapis.com"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let Some(host) = state.places().config().nearby_endpoint().host_str() else {
        let status = HealthStatus::not_ready(SERVICE, VERSION, "provider endpoint has no host");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    };

    let status = HealthStatus::ready(SERVICE, VERSION, state.posts().len(), host.to_string());
    (StatusCode::OK, Json(status)).into_response()
}
