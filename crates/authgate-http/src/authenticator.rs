//! Request authentication: token extraction, resolution, header stamping

use std::sync::Arc;

use authgate_core::{ResolutionResult, TokenResolver};
use axum::http::{HeaderMap, HeaderValue, Uri};
use tracing::debug;

use crate::headers::{HEADER_CALLER_ID, HEADER_CLIENT_ID, PARAM_TOKEN};

/// Authenticates requests by resolving the `token` query parameter into
/// trusted identity headers.
///
/// Holds its [`TokenResolver`] behind an `Arc` so one authenticator can be
/// cloned into every request handler; there is no shared mutable state and
/// concurrent authentications are fully independent.
#[derive(Clone)]
pub struct Authenticator {
    resolver: Arc<dyn TokenResolver>,
}

impl Authenticator {
    /// Create an authenticator backed by the given resolver
    pub fn new(resolver: Arc<dyn TokenResolver>) -> Self {
        Self { resolver }
    }

    /// Run the authentication protocol against one request.
    ///
    /// Inbound trust headers are stripped unconditionally before anything
    /// else, so externally supplied identity can never survive. Then:
    ///
    /// - no `token` query parameter: the request proceeds anonymously
    /// - token resolves: `X-Caller-Id` is stamped from `user_id` and
    ///   `X-Client-Id` from `client_id`
    /// - token is unknown to the introspection service: the request
    ///   proceeds anonymously, exactly as if no token had been sent.
    ///   This fail-open policy is deliberate; downstream handlers must
    ///   not be able to tell an invalid token from a missing one.
    /// - any other resolution failure is returned unchanged
    ///
    /// Calling this twice on the same request yields the same final
    /// header state as calling it once.
    pub async fn authenticate(&self, uri: &Uri, headers: &mut HeaderMap) -> ResolutionResult<()> {
        clean_request(headers);

        let token_id = match token_param(uri) {
            Some(token_id) => token_id,
            None => return Ok(()),
        };

        let identity = match self.resolver.resolve(&token_id).await {
            Ok(identity) => identity,
            Err(err) if err.is_not_found() => {
                debug!("token not resolvable, continuing unauthenticated");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        // Distinct sources: caller from user_id, client from client_id
        set_i64(headers, HEADER_CALLER_ID, identity.user_id);
        set_i64(headers, HEADER_CLIENT_ID, identity.client_id);

        Ok(())
    }
}

/// Remove inbound trust headers, regardless of whether a token is present
pub fn clean_request(headers: &mut HeaderMap) {
    headers.remove(HEADER_CLIENT_ID);
    headers.remove(HEADER_CALLER_ID);
}

/// Trimmed `token` query parameter, if present and non-empty
fn token_param(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == PARAM_TOKEN)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn set_i64(headers: &mut HeaderMap, name: &'static str, value: i64) {
    // the decimal rendering of an i64 is always a valid header value
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use authgate_core::{Identity, RemoteError, ResolutionError};

    /// Deterministic resolver: a fixed outcome per token id
    struct FakeResolver {
        outcome: fn(&str) -> ResolutionResult<Identity>,
    }

    #[async_trait]
    impl TokenResolver for FakeResolver {
        async fn resolve(&self, token_id: &str) -> ResolutionResult<Identity> {
            (self.outcome)(token_id)
        }
    }

    fn authenticator(outcome: fn(&str) -> ResolutionResult<Identity>) -> Authenticator {
        Authenticator::new(Arc::new(FakeResolver { outcome }))
    }

    fn resolved_identity(_: &str) -> ResolutionResult<Identity> {
        Ok(Identity {
            id: "1234".to_string(),
            user_id: 123,
            client_id: 12,
        })
    }

    fn not_found(_: &str) -> ResolutionResult<Identity> {
        Err(ResolutionError::Remote(RemoteError {
            message: "token not found".to_string(),
            status: 404,
            error: "not_found".to_string(),
            causes: vec![],
        }))
    }

    fn internal(_: &str) -> ResolutionResult<Identity> {
        Err(ResolutionError::internal(
            "could not contact the introspection service",
        ))
    }

    fn preset_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_CALLER_ID, "999".parse().unwrap());
        headers.insert(HEADER_CLIENT_ID, "999".parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn no_token_clears_preset_trust_headers() {
        let auth = authenticator(resolved_identity);
        let uri: Uri = "http://localhost/test".parse().unwrap();
        let mut headers = preset_headers();

        auth.authenticate(&uri, &mut headers).await.unwrap();

        assert_eq!(crate::headers::caller_id(&headers), 0);
        assert_eq!(crate::headers::client_id(&headers), 0);
    }

    #[tokio::test]
    async fn blank_token_is_treated_as_absent() {
        let auth = authenticator(internal);
        let uri: Uri = "http://localhost/test?token=%20%20".parse().unwrap();
        let mut headers = HeaderMap::new();

        // whitespace-only token never reaches the resolver
        auth.authenticate(&uri, &mut headers).await.unwrap();
        assert!(headers.get(HEADER_CALLER_ID).is_none());
    }

    #[tokio::test]
    async fn resolved_token_stamps_distinct_fields() {
        let auth = authenticator(resolved_identity);
        let uri: Uri = "http://localhost/test?token=1234".parse().unwrap();
        let mut headers = preset_headers();

        auth.authenticate(&uri, &mut headers).await.unwrap();

        // caller from user_id, client from client_id, never conflated
        assert_eq!(crate::headers::caller_id(&headers), 123);
        assert_eq!(crate::headers::client_id(&headers), 12);
    }

    #[tokio::test]
    async fn not_found_token_degrades_to_anonymous() {
        let auth = authenticator(not_found);
        let uri: Uri = "http://localhost/test?token=1234".parse().unwrap();
        let mut headers = preset_headers();

        auth.authenticate(&uri, &mut headers).await.unwrap();

        assert_eq!(crate::headers::caller_id(&headers), 0);
        assert_eq!(crate::headers::client_id(&headers), 0);
    }

    #[tokio::test]
    async fn other_resolution_errors_propagate() {
        let auth = authenticator(internal);
        let uri: Uri = "http://localhost/test?token=1234".parse().unwrap();
        let mut headers = preset_headers();

        let err = auth.authenticate(&uri, &mut headers).await.unwrap_err();
        assert!(matches!(err, ResolutionError::Internal { .. }));

        // trust headers were still cleaned before the failure
        assert_eq!(crate::headers::caller_id(&headers), 0);
    }

    #[tokio::test]
    async fn authenticate_is_idempotent() {
        let auth = authenticator(resolved_identity);
        let uri: Uri = "http://localhost/test?token=1234".parse().unwrap();
        let mut headers = HeaderMap::new();

        auth.authenticate(&uri, &mut headers).await.unwrap();
        let first = headers.clone();
        auth.authenticate(&uri, &mut headers).await.unwrap();

        assert_eq!(first, headers);
        assert_eq!(crate::headers::caller_id(&headers), 123);
        assert_eq!(crate::headers::client_id(&headers), 12);
    }

    #[test]
    fn token_param_trims_and_rejects_empty() {
        let uri: Uri = "http://localhost/test?token=%20abc%20".parse().unwrap();
        assert_eq!(token_param(&uri), Some("abc".to_string()));

        let uri: Uri = "http://localhost/test?token=".parse().unwrap();
        assert_eq!(token_param(&uri), None);

        let uri: Uri = "http://localhost/test".parse().unwrap();
        assert_eq!(token_param(&uri), None);
    }
}
