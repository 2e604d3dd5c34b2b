//! Authentication middleware and extractors.
//!
//! Provides the extractor that gates every mutating route: the session token
//! travels in the `x-session-id` request header and is resolved against the
//! session table before any handler logic runs.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use crate::db::sessions::SessionRepository;
use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Request header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extractor that requires an authenticated session.
///
/// Rejects with 401 if the header is missing or the token is unknown or
/// expired. Ownership checks (403) happen downstream, against the resolved
/// identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AppError::Unauthenticated)?;

        let identity = SessionRepository::new(state.pool())
            .resolve(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self(identity))
    }
}

/// Read the raw session token from request headers, if present.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER)?.to_str().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_absent() {
        let headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_session_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("abc123"));
        assert_eq!(session_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_session_token_non_utf8_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_bytes(&[0xff, 0xfe]).expect("opaque bytes are a valid header value"),
        );
        assert!(session_token(&headers).is_none());
    }
}
