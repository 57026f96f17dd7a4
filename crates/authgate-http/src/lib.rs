//! authgate-http - request authentication middleware
//!
//! Resolves the `token` query parameter of an inbound request into trusted
//! identity headers (`X-Caller-Id`, `X-Client-Id`) that downstream handlers
//! can rely on. Inbound copies of those headers are always stripped first,
//! so no external caller can forge them.
//!
//! An invalid or expired token deliberately degrades to anonymous access
//! (same as no token at all) rather than an error; see
//! [`Authenticator::authenticate`] before changing that.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use authgate_client::IntrospectionClient;
//! use authgate_http::{authenticate_middleware, Authenticator};
//! use axum::{middleware, routing::get, Router};
//!
//! let resolver = IntrospectionClient::new("http://localhost:8081")?;
//! let authenticator = Authenticator::new(Arc::new(resolver));
//!
//! let app: Router = Router::new()
//!     .route("/whoami", get(whoami))
//!     .layer(middleware::from_fn_with_state(
//!         authenticator,
//!         authenticate_middleware,
//!     ));
//! ```

pub mod authenticator;
pub mod error;
pub mod headers;
pub mod middleware;

pub use authenticator::{clean_request, Authenticator};
pub use error::AuthError;
pub use headers::{
    caller_id, client_id, is_public, HEADER_CALLER_ID, HEADER_CLIENT_ID, HEADER_PUBLIC,
    PARAM_TOKEN,
};
pub use middleware::authenticate_middleware;
