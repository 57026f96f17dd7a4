//! Error taxonomy for token resolution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for token resolution
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Structured error body returned by the introspection service.
///
/// Carries the remote service's own status code and causes so callers can
/// act on its taxonomy (not-found, forbidden, ...) without re-deriving it
/// from transport-level information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// HTTP status code assigned by the remote service
    #[serde(default)]
    pub status: u16,
    /// Machine-readable error code (e.g. "not_found")
    #[serde(default)]
    pub error: String,
    /// Underlying causes reported by the remote service
    #[serde(default)]
    pub causes: Vec<String>,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.status, self.message)
    }
}

/// Errors that can occur while resolving a token
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Transport failure or undecodable response.
    ///
    /// The message is a fixed description of where resolution broke down;
    /// it never carries identity data from the wire.
    #[error("{message}")]
    Internal {
        /// What failed
        message: String,
        /// Transport or decode error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Structured error propagated verbatim from the introspection service
    #[error("{0}")]
    Remote(RemoteError),
}

impl ResolutionError {
    /// Create an internal error with no underlying cause
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error wrapping an underlying cause
    pub fn internal_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True when the remote service reported the token as unresolvable
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(remote) if remote.status == 404)
    }

    /// HTTP status code to render this error with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Internal { .. } => 500,
            // A remote error without a usable status still renders as 500
            Self::Remote(remote) if remote.status >= 100 => remote.status,
            Self::Remote(_) => 500,
        }
    }
}
