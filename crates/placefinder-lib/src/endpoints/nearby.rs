//! Nearby-search schema, shared by the places-nearby and random-picker routes.

use std::fmt;

use once_cell::sync::Lazy;

use super::{first, FromQuery};
use crate::params::CanonicalParams;
use crate::schema::{parse_number, Coordinate, NumberInRange, OneOf, Schema, SingleNonEmpty};

/// Query keys recognized by nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NearbyKey {
    Location,
    Type,
    Radius,
    Keyword,
}

impl NearbyKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            NearbyKey::Location => "location",
            NearbyKey::Type => "type",
            NearbyKey::Radius => "radius",
            NearbyKey::Keyword => "keyword",
        }
    }
}

impl fmt::Display for NearbyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search radius bounds in meters, inclusive.
pub const RADIUS_LOWER_LIMIT: f64 = 0.0;
pub const RADIUS_UPPER_LIMIT: f64 = 50_000.0;

/// Place categories a client may search for.
pub const VALID_TYPES: &[&str] = &["restaurant"];

pub const REQUIRED_KEYS: &[&str] = &[NearbyKey::Location.as_str(), NearbyKey::Type.as_str()];

pub static NEARBY_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .rule(NearbyKey::Location.as_str(), Coordinate)
        .rule(NearbyKey::Type.as_str(), OneOf::new(VALID_TYPES))
        .rule(
            NearbyKey::Radius.as_str(),
            NumberInRange::new(RADIUS_LOWER_LIMIT, RADIUS_UPPER_LIMIT),
        )
        .rule(NearbyKey::Keyword.as_str(), SingleNonEmpty)
});

/// A validated nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    /// `lat,lng` exactly as the client sent it.
    pub location: String,
    pub place_type: String,
    /// Radius text as sent; see [`NearbySearch::radius_meters`].
    pub radius: Option<String>,
    pub keyword: Option<String>,
}

impl NearbySearch {
    /// Radius as a number of meters.
    ///
    /// A radius of zero counts as absent, so the provider default applies.
    pub fn radius_meters(&self) -> Option<f64> {
        self.radius
            .as_deref()
            .and_then(parse_number)
            .filter(|radius| *radius != 0.0)
    }
}

impl FromQuery for NearbySearch {
    const ENDPOINT: &'static str = "places-nearby";
    const REQUIRED_KEYS: Option<&'static [&'static str]> = Some(REQUIRED_KEYS);

    fn schema() -> &'static Schema {
        &NEARBY_SCHEMA
    }

    fn from_validated(params: &CanonicalParams) -> Option<Self> {
        Some(Self {
            location: first(params, NearbyKey::Location.as_str())?.to_string(),
            place_type: first(params, NearbyKey::Type.as_str())?.to_string(),
            radius: first(params, NearbyKey::Radius.as_str()).map(str::to_string),
            keyword: first(params, NearbyKey::Keyword.as_str()).map(str::to_string),
        })
    }
}
