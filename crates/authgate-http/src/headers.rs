//! Trust header contract shared with downstream handlers

use axum::http::HeaderMap;

/// Marks an endpoint as tolerating anonymous access.
/// Set upstream by the routing layer; read-only here.
pub const HEADER_PUBLIC: &str = "X-Public";
/// Trusted calling-application id. Settable only by the authenticator.
pub const HEADER_CLIENT_ID: &str = "X-Client-Id";
/// Trusted end-user id. Settable only by the authenticator.
pub const HEADER_CALLER_ID: &str = "X-Caller-Id";
/// Query parameter carrying the access token identifier
pub const PARAM_TOKEN: &str = "token";

/// True only when the public marker is literally `"true"`
pub fn is_public(headers: &HeaderMap) -> bool {
    headers.get(HEADER_PUBLIC).and_then(|v| v.to_str().ok()) == Some("true")
}

/// Trusted end-user id; 0 when the header is missing or not an integer
pub fn caller_id(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_CALLER_ID)
}

/// Trusted calling-application id; 0 when the header is missing or not an integer
pub fn client_id(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_CLIENT_ID)
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
