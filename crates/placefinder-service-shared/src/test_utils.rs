//! Fixtures for handler tests.
//!
//! [`test_state`] points every provider endpoint at a caller-supplied base
//! URL (typically a mock server) and preloads [`sample_posts`].

use chrono::NaiveDate;
use placefinder_lib::{PlacesClient, PostCatalog, PostSummary, ProviderConfig};

use crate::state::AppState;

/// API key baked into test state.
pub const TEST_API_KEY: &str = "test-api-key";

pub const NEARBY_PATH: &str = "/nearby";
pub const DETAILS_PATH: &str = "/details";
pub const PICKER_PATH: &str = "/picker";

fn post(slug: &str, title: &str, (y, m, d): (i32, u32, u32), tags: &[&str]) -> PostSummary {
    PostSummary {
        slug: slug.to_string(),
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap_or_else(|| panic!("invalid fixture date for {slug}")),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Three posts: `index-funds` (finance, values), `rust-services` (tech) and
/// `reading-list` (books, values), newest first in that order.
pub fn sample_posts() -> Vec<PostSummary> {
    vec![
        post(
            "reading-list",
            "What I read this year",
            (2023, 12, 30),
            &["books", "values"],
        ),
        post(
            "index-funds",
            "Index funds, slowly",
            (2024, 3, 2),
            &["finance", "values"],
        ),
        post(
            "rust-services",
            "Small services in Rust",
            (2024, 1, 15),
            &["tech"],
        ),
    ]
}

/// Provider configuration whose endpoints live under `provider_base`.
///
/// # Panics
///
/// Panics if `provider_base` is not an absolute URL.
pub fn test_provider_config(provider_base: &str) -> ProviderConfig {
    let base = provider_base.trim_end_matches('/');
    ProviderConfig::new(TEST_API_KEY)
        .and_then(|c| c.with_nearby_endpoint(&format!("{base}{NEARBY_PATH}")))
        .and_then(|c| c.with_details_endpoint(&format!("{base}{DETAILS_PATH}")))
        .and_then(|c| c.with_picker_endpoint(&format!("{base}{PICKER_PATH}")))
        .unwrap_or_else(|e| panic!("invalid provider base {provider_base:?}: {e}"))
}

/// Application state against a provider at `provider_base`.
pub fn test_state(provider_base: &str) -> AppState {
    let places = PlacesClient::new(test_provider_config(provider_base))
        .unwrap_or_else(|e| panic!("failed to build test client: {e}"));
    AppState::from_components(places, PostCatalog::from_posts(sample_posts()))
}
