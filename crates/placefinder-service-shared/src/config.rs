//! Service configuration from the environment.
//!
//! # Environment Variables
//!
//! - `GOOGLE_MAPS_API_KEY`: provider credential (required)
//! - `GOOGLE_MAPS_NEARBY_API_ENDPOINT`: override for nearby search
//! - `GOOGLE_MAPS_DETAILS_API_ENDPOINT`: override for place details
//! - `GOOGLE_MAPS_API_ENDPOINT`: override for the random picker
//! - `POSTS_DIR`: directory of Markdown posts (default: `posts`)
//! - `SERVICE_PORT`: HTTP port (default: 8080)

use std::path::PathBuf;

use placefinder_lib::ProviderConfig;
use thiserror::Error;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const NEARBY_ENDPOINT_ENV: &str = "GOOGLE_MAPS_NEARBY_API_ENDPOINT";
pub const DETAILS_ENDPOINT_ENV: &str = "GOOGLE_MAPS_DETAILS_API_ENDPOINT";
pub const PICKER_ENDPOINT_ENV: &str = "GOOGLE_MAPS_API_ENDPOINT";
pub const POSTS_DIR_ENV: &str = "POSTS_DIR";
pub const SERVICE_PORT_ENV: &str = "SERVICE_PORT";

const DEFAULT_POSTS_DIR: &str = "posts";
const DEFAULT_PORT: u16 = 8080;

/// Error while reading service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable was unset or blank.
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    /// A variable was set but unusable.
    #[error("environment variable {name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Everything the service needs to start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub provider: ProviderConfig,
    pub posts_dir: PathBuf,
    pub port: u16,
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or(ConfigError::Missing(API_KEY_ENV))?;
        let mut provider = ProviderConfig::new(api_key).map_err(|e| invalid(API_KEY_ENV, e))?;

        if let Some(endpoint) = get(NEARBY_ENDPOINT_ENV) {
            provider = provider
                .with_nearby_endpoint(&endpoint)
                .map_err(|e| invalid(NEARBY_ENDPOINT_ENV, e))?;
        }
        if let Some(endpoint) = get(DETAILS_ENDPOINT_ENV) {
            provider = provider
                .with_details_endpoint(&endpoint)
                .map_err(|e| invalid(DETAILS_ENDPOINT_ENV, e))?;
        }
        if let Some(endpoint) = get(PICKER_ENDPOINT_ENV) {
            provider = provider
                .with_picker_endpoint(&endpoint)
                .map_err(|e| invalid(PICKER_ENDPOINT_ENV, e))?;
        }

        let posts_dir = get(POSTS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR));

        let port = match get(SERVICE_PORT_ENV) {
            Some(port) => port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: SERVICE_PORT_ENV,
                message: format!("'{}' is not a port number", port),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            provider,
            posts_dir,
            port,
        })
    }
}

fn invalid(name: &'static str, error: placefinder_lib::Error) -> ConfigError {
    ConfigError::Invalid {
        name,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[(API_KEY_ENV, "abc")])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
        assert_eq!(
            config.provider.nearby_endpoint().as_str(),
            placefinder_lib::provider::DEFAULT_NEARBY_ENDPOINT
        );
    }

    #[test]
    fn test_config_missing_api_key() {
        let err = ServiceConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(API_KEY_ENV)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_config_blank_api_key_is_missing() {
        let err = ServiceConfig::from_lookup(lookup(&[(API_KEY_ENV, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_config_endpoint_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc"),
            (NEARBY_ENDPOINT_ENV, "http://localhost:9000/nearby"),
            (DETAILS_ENDPOINT_ENV, "http://localhost:9000/details"),
            (PICKER_ENDPOINT_ENV, "http://localhost:9000/picker"),
            (POSTS_DIR_ENV, "/srv/posts"),
            (SERVICE_PORT_ENV, "3000"),
        ]))
        .unwrap();

        assert_eq!(
            config.provider.nearby_endpoint().as_str(),
            "http://localhost:9000/nearby"
        );
        assert_eq!(
            config.provider.details_endpoint().as_str(),
            "http://localhost:9000/details"
        );
        assert_eq!(
            config.provider.picker_endpoint().as_str(),
            "http://localhost:9000/picker"
        );
        assert_eq!(config.posts_dir, PathBuf::from("/srv/posts"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_config_invalid_endpoint() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc"),
            (DETAILS_ENDPOINT_ENV, "not a url"),
        ]))
        .unwrap_err();

        match err {
            ConfigError::Invalid { name, .. } => assert_eq!(name, DETAILS_ENDPOINT_ENV),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_invalid_port() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc"),
            (SERVICE_PORT_ENV, "eighty"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("eighty"));
    }
}
