//! Per-endpoint schemas and the typed requests built from validated queries.
//!
//! Each endpoint module declares its recognized keys, its required keys and a
//! [`Schema`] built once on first use. [`FromQuery`] ties those together: a
//! canonical map either becomes the endpoint's typed request or the full list
//! of validation errors.

pub mod details;
pub mod nearby;
pub mod posts;

use crate::params::CanonicalParams;
use crate::schema::{validate, Schema, ValidationError};

pub use details::{DetailsKey, DetailsLookup};
pub use nearby::{NearbyKey, NearbySearch};
pub use posts::{PostFilter, PostSummaryKey};

/// A request type that can be read from a validated query.
pub trait FromQuery: Sized {
    /// Route name used in logs and metric labels.
    const ENDPOINT: &'static str;

    /// Keys that must be present before content checks run.
    const REQUIRED_KEYS: Option<&'static [&'static str]>;

    /// Schema the query is validated against.
    fn schema() -> &'static Schema;

    /// Extract the typed request from a map that already passed validation.
    ///
    /// Returns `None` only if a required value is unexpectedly absent.
    fn from_validated(params: &CanonicalParams) -> Option<Self>;

    /// Validate `params` and build the typed request.
    ///
    /// On failure every validation error is returned; the request must be
    /// rejected as a whole.
    fn from_params(params: &CanonicalParams) -> Result<Self, Vec<ValidationError>> {
        let errors = validate(params, Self::schema(), Self::REQUIRED_KEYS);
        if !errors.is_empty() {
            return Err(errors);
        }

        Self::from_validated(params).ok_or_else(|| {
            vec![ValidationError::missing_required(
                Self::REQUIRED_KEYS.unwrap_or_default(),
                params,
            )]
        })
    }
}

/// First value of `key`, if present.
pub(crate) fn first<'a>(params: &'a CanonicalParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(|values| values.first())
        .map(String::as_str)
}
