//! Placefinder HTTP service.
//!
//! # Endpoints
//!
//! - `GET /api/places-nearby` - nearby places, provider `results` array
//! - `GET /api/place-details` - one place, provider `result` object
//! - `GET /api/post-summary-data` - post summaries, optionally filtered by `tags`
//! - `GET /api/random-picker` - nearby search against the picker endpoint, raw payload
//! - `GET /health/live`, `GET /health/ready` - probes
//! - `GET /metrics` - Prometheus exposition
//!
//! Every `/api` route validates its whole query first. A rejected query gets
//! `400` with a JSON array of messages and the provider is never called. A
//! provider failure gets `502` problem details.

use axum::{Router, extract::State, routing::get};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use placefinder_lib::{
    DetailsLookup, FetchError, FromQuery, NearbySearch, PostFilter, PostSummary,
};
use placefinder_service_shared::{
    ApiResponse, AppState, CanonicalQuery, MetricsLayer, ProblemDetails, RequestId,
    ValidationRejection, from_fetch_error, health_live, health_ready, metrics_handler,
    record_provider_failure, record_results_returned, record_validation_rejected,
};

/// Metric and log label of the random picker route.
pub const RANDOM_PICKER_ENDPOINT: &str = "random-picker";

/// Build the service router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/places-nearby", get(places_nearby_handler))
        .route("/api/place-details", get(place_details_handler))
        .route("/api/post-summary-data", get(post_summary_handler))
        .route("/api/random-picker", get(random_picker_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Validate `params` as a `T` request, counting and logging rejections.
fn accept<T: FromQuery>(
    endpoint: &'static str,
    params: &placefinder_lib::CanonicalParams,
) -> Result<T, ValidationRejection> {
    debug!(endpoint, ?params, "validating query");

    T::from_params(params).map_err(|errors| {
        record_validation_rejected(endpoint, errors.len());
        info!(endpoint, errors = errors.len(), "query rejected");
        ValidationRejection::from(errors)
    })
}

fn provider_failure(
    endpoint: &'static str,
    err: &FetchError,
    request_id: &RequestId,
) -> ProblemDetails {
    record_provider_failure(endpoint, err.kind());
    error!(endpoint, kind = err.kind(), error = %err, "provider call failed");
    from_fetch_error(err, request_id.as_str())
}

/// Handle GET /api/places-nearby.
async fn places_nearby_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    CanonicalQuery(params): CanonicalQuery,
) -> ApiResponse<Vec<Value>> {
    let endpoint = NearbySearch::ENDPOINT;
    let search = match accept::<NearbySearch>(endpoint, &params) {
        Ok(search) => search,
        Err(rejection) => return rejection.into(),
    };

    match state.places().places_nearby(&search).await {
        Ok(results) => {
            record_results_returned(endpoint, results.len());
            ApiResponse::Success(results)
        }
        Err(err) => provider_failure(endpoint, &err, &request_id).into(),
    }
}

/// Handle GET /api/place-details.
async fn place_details_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    CanonicalQuery(params): CanonicalQuery,
) -> ApiResponse<Value> {
    let endpoint = DetailsLookup::ENDPOINT;
    let lookup = match accept::<DetailsLookup>(endpoint, &params) {
        Ok(lookup) => lookup,
        Err(rejection) => return rejection.into(),
    };

    match state.places().place_details(&lookup).await {
        Ok(result) => {
            record_results_returned(endpoint, 1);
            ApiResponse::Success(result)
        }
        Err(err) => provider_failure(endpoint, &err, &request_id).into(),
    }
}

/// Handle GET /api/post-summary-data.
async fn post_summary_handler(
    State(state): State<AppState>,
    CanonicalQuery(params): CanonicalQuery,
) -> ApiResponse<Vec<PostSummary>> {
    let endpoint = PostFilter::ENDPOINT;
    let filter = match accept::<PostFilter>(endpoint, &params) {
        Ok(filter) => filter,
        Err(rejection) => return rejection.into(),
    };

    let summaries = state.posts().summaries(&filter);
    record_results_returned(endpoint, summaries.len());
    ApiResponse::Success(summaries)
}

/// Handle GET /api/random-picker.
async fn random_picker_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    CanonicalQuery(params): CanonicalQuery,
) -> ApiResponse<Value> {
    let endpoint = RANDOM_PICKER_ENDPOINT;
    let search = match accept::<NearbySearch>(endpoint, &params) {
        Ok(search) => search,
        Err(rejection) => return rejection.into(),
    };

    match state.places().random_picker(&search).await {
        Ok(payload) => {
            let count = payload
                .get("results")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            record_results_returned(endpoint, count);
            ApiResponse::Success(payload)
        }
        Err(err) => provider_failure(endpoint, &err, &request_id).into(),
    }
}
