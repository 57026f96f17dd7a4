//! Error types for client construction

use thiserror::Error;

/// Errors that can occur while building an
/// [`IntrospectionClient`](crate::IntrospectionClient)
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid base URL
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
