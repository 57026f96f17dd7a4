//! HTTP rendering for resolution errors

use authgate_core::{RemoteError, ResolutionError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Resolution error surfaced to the HTTP caller.
///
/// Remote errors render with their original status code and structured
/// body, so the introspection service's own taxonomy (forbidden, bad
/// request, ...) reaches the client unchanged. Internal failures render
/// as a plain 500 with the fixed resolution message; underlying transport
/// causes stay in the logs.
#[derive(Debug)]
pub struct AuthError(pub ResolutionError);

impl From<ResolutionError> for AuthError {
    fn from(err: ResolutionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self.0 {
            ResolutionError::Remote(remote) => {
                tracing::debug!(
                    status = remote.status,
                    error = %remote.error,
                    "authentication rejected by introspection service"
                );
                let status = StatusCode::from_u16(remote.status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(remote)).into_response()
            }
            err @ ResolutionError::Internal { .. } => {
                tracing::error!(error = %err, "token resolution failed");
                let body = RemoteError {
                    message: err.to_string(),
                    status: 500,
                    error: "internal_server_error".to_string(),
                    causes: vec![],
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
