//! Generic outbound JSON GET.
//!
//! One call is one network round trip. There is no retry, cache or timeout
//! here; the client passed in decides whether a timeout applies.

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Query parameters whose values never reach the logs.
const REDACTED_PARAMS: &[&str] = &["key"];

/// Failure of an outbound provider call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with a non-2xx status. The body is not read.
    #[error("{status_text}")]
    Status { status: u16, status_text: String },

    /// The provider answered 2xx but reported a logical failure in its body.
    #[error("provider returned {status}: {message}")]
    Provider { status: String, message: String },

    /// The request never produced a response.
    #[error("request to provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body was not the JSON shape the caller asked for.
    #[error("failed to decode provider response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "status",
            FetchError::Provider { .. } => "provider",
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
        }
    }
}

/// GET `url` and decode the JSON body as `T`.
///
/// A non-success status fails with [`FetchError::Status`] carrying the
/// status text. The response shape is trusted: no validation beyond what
/// deserializing into `T` implies.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T, FetchError> {
    debug!(url = %redacted(url), "fetching provider resource");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(FetchError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        let status_text = status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();
        warn!(
            url = %redacted(url),
            status = status.as_u16(),
            "provider request failed"
        );
        return Err(FetchError::Status {
            status: status.as_u16(),
            status_text,
        });
    }

    response.json::<T>().await.map_err(FetchError::Decode)
}

/// Render `url` for logging with credential parameters masked.
pub fn redacted(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if REDACTED_PARAMS.iter().any(|name| *name == k) {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
