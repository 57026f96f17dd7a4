//! Wire models for the token introspection service

use serde::{Deserialize, Serialize};

/// Identity resolved from an access token.
///
/// Only ever produced by a successful introspection call. The value has no
/// lifecycle of its own: the authenticator copies `user_id` and `client_id`
/// into trust headers and discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque token identifier, informational only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// End-user identifier (0 when absent)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: i64,
    /// Calling-application identifier (0 when absent)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub client_id: i64,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}
