//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Used for every failure that is not a query validation error.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use placefinder_lib::FetchError;

/// Problem type URI for a failed or rejected provider call.
pub const PROBLEM_PROVIDER_ERROR: &str = "/problems/provider-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use placefinder_service_shared::{ProblemDetails, PROBLEM_PROVIDER_ERROR};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_PROVIDER_ERROR,
///     "Provider Error",
///     StatusCode::BAD_GATEWAY,
/// )
/// .with_detail("Service Unavailable")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request id of the failing request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 502 Bad Gateway for a provider call that did not yield a usable payload.
    pub fn bad_gateway(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_PROVIDER_ERROR,
            "Provider Error",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Convert an outbound fetch failure to ProblemDetails.
///
/// Every variant maps to 502; the detail carries the provider's status text
/// or status code, never the request URL.
pub fn from_fetch_error(error: &FetchError, request_id: &str) -> ProblemDetails {
    let detail = match error {
        FetchError::Status { status_text, .. } => status_text.clone(),
        FetchError::Provider { status, message } => format!("{}: {}", status, message),
        FetchError::Transport(_) => "provider unreachable".to_string(),
        FetchError::Decode(_) => "provider returned an unreadable payload".to_string(),
    };

    ProblemDetails::bad_gateway(detail, request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_PROVIDER_ERROR,
            "Provider Error",
            StatusCode::BAD_GATEWAY,
        );
        assert_eq!(problem.type_uri, PROBLEM_PROVIDER_ERROR);
        assert_eq!(problem.title, "Provider Error");
        assert_eq!(problem.status, 502);
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_gateway("Service Unavailable", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/provider-error\""));
        assert!(json.contains("\"title\":\"Provider Error\""));
        assert!(json.contains("\"status\":502"));
        assert!(json.contains("\"detail\":\"Service Unavailable\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_problem_details_into_response() {
        let response = ProblemDetails::bad_gateway("boom", "req-1").into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }

    #[test]
    fn test_from_fetch_error_status() {
        let error = FetchError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        let problem = from_fetch_error(&error, "req-fetch");

        assert_eq!(problem.status, 502);
        assert_eq!(problem.detail.as_deref(), Some("Service Unavailable"));
        assert_eq!(problem.instance.as_deref(), Some("req-fetch"));
    }

    #[test]
    fn test_from_fetch_error_provider() {
        let error = FetchError::Provider {
            status: "REQUEST_DENIED".to_string(),
            message: "The provided API key is invalid.".to_string(),
        };
        let problem = from_fetch_error(&error, "req-provider");

        assert_eq!(problem.type_uri, PROBLEM_PROVIDER_ERROR);
        assert!(problem.detail.as_deref().unwrap().starts_with("REQUEST_DENIED"));
    }
}
