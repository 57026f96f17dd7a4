//! Introspection HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use authgate_core::{Identity, RemoteError, ResolutionError, ResolutionResult, TokenResolver};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::ClientError;

/// Encode a token identifier for use in a path segment.
///
/// A token containing a literal `/` must become a single segment
/// (`a%2Fb`), not two, so it cannot change the request path shape.
fn encode_path_segment(id: &str) -> String {
    id.replace('/', "%2F")
}

/// Default per-request timeout. Introspection sits on every request path,
/// so a hung remote must not stall callers for longer than this.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(200);

/// Client for the token introspection endpoint.
///
/// Cheap to clone; all clones share one connection pool. Build one at
/// startup and hand it to every request handler — there is no per-call
/// mutable state.
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    client: Client,
    base_url: Url,
}

impl IntrospectionClient {
    /// Create a new introspection client with the default timeouts
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the introspection service (e.g., "http://localhost:8081")
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new introspection client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Fetch and decode the access token record for `token_id`.
    ///
    /// Single attempt, no retries. A timeout is a transport failure, not
    /// identity absence.
    async fn get_access_token(&self, token_id: &str) -> ResolutionResult<Identity> {
        let url = self
            .base_url
            .join(&format!("/oauth/token/{}", encode_path_segment(token_id)))
            .map_err(|e| ResolutionError::internal_with("invalid introspection URL", e))?;
        debug!(%url, "resolving access token");

        let response = self.client.get(url).send().await.map_err(|e| {
            ResolutionError::internal_with("could not contact the introspection service", e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            ResolutionError::internal_with("could not read the introspection response", e)
        })?;

        if !status.is_success() {
            // Error bodies are passed through verbatim, status and causes
            // included, so the caller can tell not-found from the rest.
            return match serde_json::from_slice::<RemoteError>(&body) {
                Ok(remote) => Err(ResolutionError::Remote(remote)),
                Err(_) => Err(ResolutionError::internal(
                    "invalid error interface when trying to get token",
                )),
            };
        }

        serde_json::from_slice(&body)
            .map_err(|_| ResolutionError::internal("could not unmarshal token response"))
    }
}

#[async_trait]
impl TokenResolver for IntrospectionClient {
    // token_id is skipped from the span: tokens are secrets
    #[instrument(skip(self, token_id))]
    async fn resolve(&self, token_id: &str) -> ResolutionResult<Identity> {
        self.get_access_token(token_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = IntrospectionClient::new("http://localhost:8081");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = IntrospectionClient::new("not a url");
        assert!(client.is_err());
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("abc123"), "abc123");
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
    }

    #[test]
    fn test_token_url() {
        let client = IntrospectionClient::new("http://localhost:8081").unwrap();
        let url = client.base_url().join("/oauth/token/abc123").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/oauth/token/abc123");
    }
}
