use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Placefinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Outbound request failures have their own type, [`crate::FetchError`], since
/// they surface per request rather than at startup.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value was absent or empty.
    #[error("missing required configuration value {name}")]
    MissingConfig { name: String },

    /// A provider endpoint override could not be parsed as an absolute URL.
    #[error("invalid provider endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// A post file did not start with a readable front matter block.
    #[error("invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client construction errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
