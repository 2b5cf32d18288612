//! Credential extraction
//!
//! Pulls a session token out of the inbound `Authorization` header and
//! exposes an axum extractor that resolves it to a verified [`Identity`].

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::error::AppError;

use crate::auth::jwt::{Identity, TokenError};
use crate::state::AppState;

/// Extract the token portion of an authorization header value.
///
/// Two accepted forms, tried in order:
/// 1. `Bearer <token>` — the remainder after the scheme prefix
/// 2. `<anything> <token>` — the second space-delimited word
///
/// Anything else yields `None`; the caller treats that as unauthenticated.
pub fn extract_token(header: Option<&str>) -> Option<&str> {
    let header = header?;

    if let Some(token) = header.strip_prefix("Bearer ") {
        return Some(token).filter(|t| !t.is_empty());
    }

    let mut parts = header.split(' ');
    parts.next()?;
    parts.next().filter(|t| !t.is_empty())
}

/// Axum extractor for the verified identity.
///
/// If the authorization gate middleware already ran, the identity is taken
/// from request extensions; otherwise the header is extracted and verified
/// here. Either way a handler parameter of type `Identity` never sees an
/// unverified principal.
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(identity.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = extract_token(auth_header).ok_or_else(AppError::unauthorized)?;

        match state.tokens.verify(token) {
            Ok(identity) => {
                parts.extensions.insert(identity.clone());
                Ok(identity)
            }
            Err(TokenError::Expired) => Err(AppError::token_expired()),
            Err(TokenError::Malformed) => Err(AppError::invalid_token("Invalid token")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_scheme() {
        assert_eq!(extract_token(Some("Bearer abc123")), Some("abc123"));
    }

    #[test]
    fn test_second_word_fallback() {
        assert_eq!(extract_token(Some("Token abc123")), Some("abc123"));
        assert_eq!(extract_token(Some("JWT abc123")), Some("abc123"));
    }

    #[test]
    fn test_absent_or_empty() {
        assert_eq!(extract_token(None), None);
        assert_eq!(extract_token(Some("")), None);
    }

    #[test]
    fn test_single_word_rejected() {
        assert_eq!(extract_token(Some("abc123")), None);
        assert_eq!(extract_token(Some("Bearer")), None);
    }

    #[test]
    fn test_empty_bearer_remainder_rejected() {
        assert_eq!(extract_token(Some("Bearer ")), None);
    }

    #[test]
    fn test_bearer_prefix_takes_priority() {
        // "Bearer a b" — prefix form wins, remainder is everything after it
        assert_eq!(extract_token(Some("Bearer a b")), Some("a b"));
    }
}
