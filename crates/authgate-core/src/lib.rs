//! authgate-core - shared types for token introspection
//!
//! This crate holds the pieces every authgate crate agrees on: the
//! [`Identity`] wire model returned by the introspection service, the
//! [`ResolutionError`] taxonomy, and the [`TokenResolver`] trait that
//! decouples the request authenticator from the concrete HTTP client.
//!
//! # Usage
//!
//! ```ignore
//! use authgate_core::{Identity, TokenResolver};
//!
//! async fn lookup(resolver: &dyn TokenResolver) -> anyhow::Result<Identity> {
//!     Ok(resolver.resolve("abc123").await?)
//! }
//! ```

pub mod error;
pub mod models;
pub mod resolver;

pub use error::{RemoteError, ResolutionError, ResolutionResult};
pub use models::Identity;
pub use resolver::TokenResolver;
