//! TokenResolver trait - the substitutable seam for identity resolution

use async_trait::async_trait;

use crate::error::ResolutionResult;
use crate::models::Identity;

/// Capability for exchanging a token identifier for an [`Identity`].
///
/// The request authenticator depends on this trait rather than a concrete
/// HTTP client, so tests can inject a deterministic fake without a live
/// introspection service.
///
/// Implementations make exactly one attempt per call and never retry;
/// retry policy, if any, belongs to the caller.
#[async_trait]
pub trait TokenResolver: Send + Sync {
    /// Resolve a non-empty, already-trimmed token identifier.
    ///
    /// Returns the decoded [`Identity`] on success, a
    /// [`ResolutionError::Remote`](crate::ResolutionError::Remote) carrying
    /// the remote service's structured error verbatim, or a
    /// [`ResolutionError::Internal`](crate::ResolutionError::Internal) for
    /// transport failures and undecodable responses.
    async fn resolve(&self, token_id: &str) -> ResolutionResult<Identity>;
}
