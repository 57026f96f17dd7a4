//! authgate-client - HTTP client for the token introspection service
//!
//! Provides [`IntrospectionClient`], a [`TokenResolver`] implementation that
//! exchanges an opaque token identifier for an identity record via
//! `GET /oauth/token/{token_id}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use authgate_client::IntrospectionClient;
//! use authgate_core::TokenResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // One client per process; clones share the connection pool.
//!     let client = IntrospectionClient::new("http://localhost:8081")?;
//!
//!     let identity = client.resolve("abc123").await?;
//!     println!("user {} via client {}", identity.user_id, identity.client_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides utilities for integration testing against
//! an in-process introspection stub:
//!
//! ```rust,ignore
//! use authgate_client::testing::TestServer;
//!
//! let server = TestServer::start(stub_router()).await?;
//! let identity = server.client.resolve("abc123").await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::IntrospectionClient;
pub use error::ClientError;

// Re-export core types for convenience
pub use authgate_core::{Identity, RemoteError, ResolutionError, TokenResolver};
