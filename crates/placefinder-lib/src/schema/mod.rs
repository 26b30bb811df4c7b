//! Declarative query schemas and the validator that applies them.
//!
//! A [`Schema`] maps each recognized key to a [`ValuePredicate`]. Validation
//! runs in two tiers: a structural gate that fails fast when a required key
//! is missing, then a content pass that reports every offending key at once
//! so a client can fix everything in one round trip.

mod predicates;

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::params::CanonicalParams;

pub use predicates::{
    parse_number, AllOf, Anything, Coordinate, ExactlyOne, NumberInRange, OneOf, SingleNonEmpty,
};

/// Capability to accept or reject the value list of one query key.
///
/// Implementations receive the list exactly as normalized, which may be empty
/// for hand-built maps; they must check its length before indexing.
pub trait ValuePredicate: Send + Sync {
    fn test(&self, values: &[String]) -> bool;
}

impl<F> ValuePredicate for F
where
    F: Fn(&[String]) -> bool + Send + Sync,
{
    fn test(&self, values: &[String]) -> bool {
        self(values)
    }
}

/// Immutable table of key rules for one endpoint.
///
/// Schemas are built once at startup and shared read-only by all requests.
#[derive(Default)]
pub struct Schema {
    rules: IndexMap<&'static str, Box<dyn ValuePredicate>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for `key`.
    pub fn rule(mut self, key: &'static str, predicate: impl ValuePredicate + 'static) -> Self {
        self.rules.insert(key, Box::new(predicate));
        self
    }

    /// Apply the rule for `key`. Unknown keys never pass.
    pub fn check(&self, key: &str, values: &[String]) -> bool {
        self.rules
            .get(key)
            .is_some_and(|predicate| predicate.test(values))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("keys", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One validation failure. Only the message is part of the public contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one required key was absent.
    #[error(
        "Missing required key! Required keys: '{}', Detected keys: '{}'",
        join_keys(.required),
        join_keys(.detected)
    )]
    MissingRequired {
        required: Vec<String>,
        detected: Vec<String>,
    },

    /// The key is unknown to the schema or its values failed the predicate.
    #[error("Key: '{key}' or associated value(s) is invalid")]
    InvalidKey { key: String },
}

impl ValidationError {
    /// Build the structural error for `params` against `required`.
    pub fn missing_required(required: &[&str], params: &CanonicalParams) -> Self {
        ValidationError::MissingRequired {
            required: required.iter().map(|key| key.to_string()).collect(),
            detected: params.keys().cloned().collect(),
        }
    }
}

fn join_keys(keys: &[String]) -> String {
    keys.join(",")
}

/// Validate `params` against `schema`, returning every failure found.
///
/// If `required` is given and any of those keys is absent, the result is a
/// single [`ValidationError::MissingRequired`] and no content checks run.
/// Otherwise each present key, in map order, yields one
/// [`ValidationError::InvalidKey`] when the schema does not know it or its
/// predicate rejects the values. An empty result means the request is valid.
pub fn validate(
    params: &CanonicalParams,
    schema: &Schema,
    required: Option<&[&str]>,
) -> Vec<ValidationError> {
    if let Some(required) = required {
        if !required.iter().all(|key| params.contains_key(*key)) {
            return vec![ValidationError::missing_required(required, params)];
        }
    }

    params
        .iter()
        .filter(|(key, values)| !schema.check(key, values))
        .map(|(key, _)| ValidationError::InvalidKey { key: key.clone() })
        .collect()
}

/// Render errors as the plain strings returned to clients.
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
