//! Placefinder library entry points.
//!
//! This crate holds everything between an untrusted query string and the
//! places provider: parameter normalization, per-endpoint schema validation,
//! canonical query-string serialization, and the outbound JSON fetcher.
//! The HTTP services only glue these pieces to axum and should not
//! reimplement any of them.
//!
//! ```text
//! raw query ─▶ params::normalize ─▶ schema::validate ─▶ endpoints::* ─▶ provider ─▶ fetch
//!                                        │
//!                                        └─▶ Vec<ValidationError> (rejected request)
//! ```

pub mod catalog;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod params;
pub mod provider;
pub mod query;
pub mod schema;

pub use catalog::{PostCatalog, PostSummary};
pub use endpoints::{DetailsLookup, FromQuery, NearbySearch, PostFilter};
pub use error::{Error, Result};
pub use fetch::{fetch_json, FetchError};
pub use params::{normalize, CanonicalParams, QueryValue, RawQuery};
pub use provider::{PlacesClient, ProviderConfig};
pub use query::serialize;
pub use schema::{validate, Schema, ValidationError, ValuePredicate};
