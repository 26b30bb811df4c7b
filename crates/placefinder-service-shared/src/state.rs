//! Application state for the HTTP service.
//!
//! Holds the provider client and the post catalog that every handler reads.

use std::sync::Arc;

use placefinder_lib::{Error as LibError, PlacesClient, PostCatalog};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to build the provider client.
    ClientBuild(LibError),

    /// Failed to read the post catalog.
    CatalogLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClientBuild(e) => write!(f, "failed to build places client: {}", e),
            Self::CatalogLoad(e) => write!(f, "failed to load post catalog: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientBuild(e) | Self::CatalogLoad(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; share it through axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use placefinder_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let posts = state.posts();
///     // ... use posts
/// }
///
/// let state = AppState::load(&ServiceConfig::from_env()?)?;
/// let app = Router::new()
///     .route("/api/post-summary-data", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    places: PlacesClient,
    posts: PostCatalog,
}

impl AppState {
    /// Build the provider client and load the post catalog.
    pub fn load(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let places =
            PlacesClient::new(config.provider.clone()).map_err(AppStateError::ClientBuild)?;

        tracing::info!(path = %config.posts_dir.display(), "loading post catalog");
        let posts = PostCatalog::load(&config.posts_dir).map_err(AppStateError::CatalogLoad)?;
        tracing::info!(post_count = posts.len(), "post catalog ready");

        Ok(Self::from_components(places, posts))
    }

    /// Create application state from already-built components.
    pub fn from_components(places: PlacesClient, posts: PostCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { places, posts }),
        }
    }

    pub fn places(&self) -> &PlacesClient {
        &self.inner.places
    }

    pub fn posts(&self) -> &PostCatalog {
        &self.inner.posts
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", self.inner.places.config())
            .field("post_count", &self.inner.posts.len())
            .finish()
    }
}
