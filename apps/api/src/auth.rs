//! Admin authentication.
//!
//! Admin endpoints require an `X-Admin-Key` header matching the configured
//! secret. The comparison is constant-time so response latency leaks nothing
//! about how much of the key matched.

use axum::http::HeaderMap;
use constant_time_eq::constant_time_eq;

use crate::error::ApiError;

/// Header carrying the admin credential.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Fallback user id when the header is absent or not valid UTF-8.
pub const DEFAULT_USER_ID: &str = "u1";

/// Rejects the request unless the admin key header matches `expected`.
pub fn require_admin(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Forbidden("Missing admin credential".to_string()))?;

    if expected.is_empty() || !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(ApiError::Forbidden("Invalid admin credential".to_string()));
    }
    Ok(())
}

/// Derives the user identity from headers.
///
/// Taken verbatim, no validation or session: this demo treats the user id as
/// an opaque string.
pub fn user_id(headers: &HeaderMap) -> &str {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_USER_ID)
}
