//! Axum middleware wiring for the authenticator

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::authenticator::Authenticator;
use crate::error::AuthError;

/// Axum middleware that authenticates every request before it reaches the
/// handler.
///
/// Wire it with `middleware::from_fn_with_state`:
///
/// ```ignore
/// let app = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn_with_state(
///         authenticator.clone(),
///         authenticate_middleware,
///     ));
/// ```
///
/// Requests without a token (or with an unresolvable one) pass through
/// anonymously; whether that is acceptable is the handler's decision,
/// typically via [`is_public`](crate::is_public) and
/// [`caller_id`](crate::caller_id).
pub async fn authenticate_middleware(
    State(authenticator): State<Authenticator>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let uri = request.uri().clone();
    authenticator
        .authenticate(&uri, request.headers_mut())
        .await?;

    Ok(next.run(request).await)
}
