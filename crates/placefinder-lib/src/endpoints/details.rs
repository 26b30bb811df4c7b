//! Place-details schema.

use std::fmt;

use once_cell::sync::Lazy;

use super::{first, FromQuery};
use crate::params::CanonicalParams;
use crate::schema::{Anything, ExactlyOne, Schema};

/// Query keys recognized by place details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailsKey {
    PlaceId,
    Fields,
}

impl DetailsKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            DetailsKey::PlaceId => "place_id",
            DetailsKey::Fields => "fields",
        }
    }
}

impl fmt::Display for DetailsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const REQUIRED_KEYS: &[&str] = &[DetailsKey::PlaceId.as_str()];

pub static DETAILS_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .rule(DetailsKey::PlaceId.as_str(), ExactlyOne)
        .rule(DetailsKey::Fields.as_str(), Anything)
});

/// A validated place-details lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsLookup {
    pub place_id: String,
    /// Requested response fields, split from the first `fields` value.
    pub fields: Option<Vec<String>>,
}

impl FromQuery for DetailsLookup {
    const ENDPOINT: &'static str = "place-details";
    const REQUIRED_KEYS: Option<&'static [&'static str]> = Some(REQUIRED_KEYS);

    fn schema() -> &'static Schema {
        &DETAILS_SCHEMA
    }

    fn from_validated(params: &CanonicalParams) -> Option<Self> {
        let fields = first(params, DetailsKey::Fields.as_str())
            .map(|fields| fields.split(',').map(str::to_string).collect());

        Some(Self {
            place_id: first(params, DetailsKey::PlaceId.as_str())?.to_string(),
            fields,
        })
    }
}
