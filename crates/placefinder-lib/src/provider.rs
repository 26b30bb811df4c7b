//! Client for the third-party places provider.
//!
//! [`PlacesClient`] is built once at startup and handed to every handler; it
//! owns a pooled [`reqwest::Client`] plus the provider credential and
//! endpoints. Outbound query strings are assembled as [`CanonicalParams`] and
//! serialized with [`crate::query`], so inbound and outbound encoding share
//! one implementation.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::endpoints::{DetailsKey, DetailsLookup, NearbyKey, NearbySearch};
use crate::error::Error;
use crate::fetch::{fetch_json, redacted, FetchError};
use crate::params::CanonicalParams;
use crate::query::with_query;

pub const DEFAULT_NEARBY_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const DEFAULT_DETAILS_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/details/json";

const USER_AGENT: &str = concat!("placefinder/", env!("CARGO_PKG_VERSION"));
const KEY_PARAM: &str = "key";

/// Provider statuses that mean the call succeeded.
const SUCCESS_STATUSES: &[&str] = &["OK", "ZERO_RESULTS"];

/// Credential and endpoints for the places provider.
#[derive(Clone)]
pub struct ProviderConfig {
    api_key: String,
    nearby_endpoint: Url,
    details_endpoint: Url,
    picker_endpoint: Url,
}

impl ProviderConfig {
    /// Configuration with the default provider endpoints.
    pub fn new(api_key: impl Into<String>) -> crate::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingConfig {
                name: "provider API key".to_string(),
            });
        }

        Ok(Self {
            api_key,
            nearby_endpoint: parse_endpoint(DEFAULT_NEARBY_ENDPOINT)?,
            details_endpoint: parse_endpoint(DEFAULT_DETAILS_ENDPOINT)?,
            picker_endpoint: parse_endpoint(DEFAULT_NEARBY_ENDPOINT)?,
        })
    }

    pub fn with_nearby_endpoint(mut self, endpoint: &str) -> crate::Result<Self> {
        self.nearby_endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_details_endpoint(mut self, endpoint: &str) -> crate::Result<Self> {
        self.details_endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_picker_endpoint(mut self, endpoint: &str) -> crate::Result<Self> {
        self.picker_endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn nearby_endpoint(&self) -> &Url {
        &self.nearby_endpoint
    }

    pub fn details_endpoint(&self) -> &Url {
        &self.details_endpoint
    }

    pub fn picker_endpoint(&self) -> &Url {
        &self.picker_endpoint
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("nearby_endpoint", &self.nearby_endpoint.as_str())
            .field("details_endpoint", &self.details_endpoint.as_str())
            .field("picker_endpoint", &self.picker_endpoint.as_str())
            .finish()
    }
}

fn parse_endpoint(endpoint: &str) -> crate::Result<Url> {
    Url::parse(endpoint).map_err(|e| Error::InvalidEndpoint {
        url: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<Value>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Value,
    status: Option<String>,
    error_message: Option<String>,
}

fn check_status(status: Option<&str>, error_message: Option<&str>) -> Result<(), FetchError> {
    match status {
        Some(status) if !SUCCESS_STATUSES.contains(&status) => Err(FetchError::Provider {
            status: status.to_string(),
            message: error_message.unwrap_or("no error message").to_string(),
        }),
        _ => Ok(()),
    }
}

/// Places provider client.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    config: ProviderConfig,
}

impl PlacesClient {
    /// Build a client with its own connection pool.
    ///
    /// No request timeout is configured; a hung provider call holds the
    /// request until the caller gives up.
    pub fn new(config: ProviderConfig) -> crate::Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        info!(config = ?config, "places client configured");
        Ok(Self::with_http_client(http, config))
    }

    /// Build a client around an existing HTTP client.
    pub fn with_http_client(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Search for places around a location; returns the provider's `results`.
    pub async fn places_nearby(&self, search: &NearbySearch) -> Result<Vec<Value>, FetchError> {
        let url = self.nearby_url(search);
        let response: NearbyResponse = fetch_json(&self.http, &url).await?;
        check_status(response.status.as_deref(), response.error_message.as_deref())?;

        debug!(results = response.results.len(), "nearby search returned");
        Ok(response.results)
    }

    /// Look up one place; returns the provider's `result` object.
    pub async fn place_details(&self, lookup: &DetailsLookup) -> Result<Value, FetchError> {
        let url = self.details_url(lookup);
        let response: DetailsResponse = fetch_json(&self.http, &url).await?;
        check_status(response.status.as_deref(), response.error_message.as_deref())?;

        Ok(response.result)
    }

    /// Nearby search against the picker endpoint, returning the raw payload.
    pub async fn random_picker(&self, search: &NearbySearch) -> Result<Value, FetchError> {
        let url = self.picker_url(search);
        fetch_json(&self.http, &url).await
    }

    /// Outbound URL for a nearby search.
    ///
    /// Parameter order: `location`, `type`, `radius`, `keyword`, `key`.
    pub fn nearby_url(&self, search: &NearbySearch) -> Url {
        let mut params = CanonicalParams::new();
        params.insert(
            NearbyKey::Location.as_str().to_string(),
            vec![search.location.clone()],
        );
        params.insert(
            NearbyKey::Type.as_str().to_string(),
            vec![search.place_type.clone()],
        );
        if let Some(radius) = search.radius_meters() {
            params.insert(NearbyKey::Radius.as_str().to_string(), vec![radius.to_string()]);
        }
        if let Some(keyword) = &search.keyword {
            params.insert(NearbyKey::Keyword.as_str().to_string(), vec![keyword.clone()]);
        }
        params.insert(KEY_PARAM.to_string(), vec![self.config.api_key.clone()]);

        self.build_url(&self.config.nearby_endpoint, &params)
    }

    /// Outbound URL for a details lookup.
    ///
    /// Parameter order: `place_id`, `fields` (comma-joined), `key`.
    pub fn details_url(&self, lookup: &DetailsLookup) -> Url {
        let mut params = CanonicalParams::new();
        params.insert(
            DetailsKey::PlaceId.as_str().to_string(),
            vec![lookup.place_id.clone()],
        );
        if let Some(fields) = &lookup.fields {
            params.insert(DetailsKey::Fields.as_str().to_string(), vec![fields.join(",")]);
        }
        params.insert(KEY_PARAM.to_string(), vec![self.config.api_key.clone()]);

        self.build_url(&self.config.details_endpoint, &params)
    }

    /// Outbound URL for the picker route.
    ///
    /// Parameter order: `location`, `type`, `key`, then `radius` and
    /// `keyword` as sent by the client.
    pub fn picker_url(&self, search: &NearbySearch) -> Url {
        let mut params = CanonicalParams::new();
        params.insert(
            NearbyKey::Location.as_str().to_string(),
            vec![search.location.clone()],
        );
        params.insert(
            NearbyKey::Type.as_str().to_string(),
            vec![search.place_type.clone()],
        );
        params.insert(KEY_PARAM.to_string(), vec![self.config.api_key.clone()]);
        if let Some(radius) = &search.radius {
            params.insert(NearbyKey::Radius.as_str().to_string(), vec![radius.clone()]);
        }
        if let Some(keyword) = &search.keyword {
            params.insert(NearbyKey::Keyword.as_str().to_string(), vec![keyword.clone()]);
        }

        self.build_url(&self.config.picker_endpoint, &params)
    }

    fn build_url(&self, endpoint: &Url, params: &CanonicalParams) -> Url {
        let url = with_query(endpoint, params);
        debug!(url = %redacted(&url), "built provider request");
        url
    }
}
