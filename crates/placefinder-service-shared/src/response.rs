//! Response types returned by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use placefinder_lib::schema::{messages, ValidationError};

use crate::problem::ProblemDetails;

/// A query that failed validation.
///
/// Rendered as `400 Bad Request` with a JSON array of error messages, in the
/// order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRejection(pub Vec<String>);

impl From<Vec<ValidationError>> for ValidationRejection {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(messages(&errors))
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

/// Outcome of an API handler.
///
/// The status code is chosen by the variant before the body is serialized.
#[derive(Debug)]
pub enum ApiResponse<T> {
    /// `200 OK` with `T` as the JSON body.
    Success(T),
    /// `400 Bad Request` with the validation messages.
    Rejected(ValidationRejection),
    /// A problem-details failure carrying its own status.
    Failed(ProblemDetails),
}

impl<T> From<ValidationRejection> for ApiResponse<T> {
    fn from(rejection: ValidationRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl<T> From<ProblemDetails> for ApiResponse<T> {
    fn from(problem: ProblemDetails) -> Self {
        Self::Failed(problem)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            Self::Rejected(rejection) => rejection.into_response(),
            Self::Failed(problem) => problem.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_from_validation_errors() {
        let rejection = ValidationRejection::from(vec![
            ValidationError::InvalidKey {
                key: "type".to_string(),
            },
            ValidationError::InvalidKey {
                key: "radius".to_string(),
            },
        ]);

        assert_eq!(
            rejection.0,
            vec![
                "Key: 'type' or associated value(s) is invalid".to_string(),
                "Key: 'radius' or associated value(s) is invalid".to_string(),
            ]
        );
    }

    #[test]
    fn test_rejection_is_bad_request() {
        let response = ValidationRejection(vec!["bad".to_string()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_success_is_ok() {
        let response = ApiResponse::Success(vec![1, 2, 3]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_failed_keeps_problem_status() {
        let response: Response =
            ApiResponse::<()>::from(ProblemDetails::bad_gateway("Bad Gateway", "req-1"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
