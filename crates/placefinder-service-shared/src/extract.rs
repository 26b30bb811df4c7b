//! Query-string extraction for API handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use placefinder_lib::{normalize, CanonicalParams, RawQuery};

/// The request's query string as a normalized [`CanonicalParams`] map.
///
/// Repeated keys keep every value in order; keys keep their first-seen
/// order. A request without a query string yields an empty map. Extraction
/// never fails: whether the map is acceptable is decided by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalQuery(pub CanonicalParams);

impl CanonicalQuery {
    pub fn from_query_string(query: &str) -> Self {
        Self(normalize(RawQuery::from_query_string(query)))
    }
}

impl<S> FromRequestParts<S> for CanonicalQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query_string(parts.uri.query().unwrap_or_default()))
    }
}
