//! Authorization gate middleware
//!
//! Two guard variants sharing one mechanism, composed around protected
//! routes. Each request is evaluated independently: extract a token, verify
//! it, then (for admin routes) check the role claim. Missing or unverifiable
//! credentials end the request with 401 before the handler runs; a verified
//! non-admin identity on an admin route ends it with 403. The distinction is
//! load-bearing — clients use it to decide "log in again" vs. "insufficient
//! privilege".

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use crate::auth::extractor::extract_token;
use crate::auth::jwt::{Identity, TokenError};
use crate::state::AppState;

/// Require a valid session token.
///
/// On success the verified [`Identity`] is inserted into request extensions
/// for the remainder of this request's processing.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = extract_token(auth_header).ok_or_else(AppError::unauthorized)?;

    match state.tokens.verify(token) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::debug!(error = %e, uri = %req.uri(), "token verification failed");
            match e {
                TokenError::Expired => Err(AppError::token_expired()),
                TokenError::Malformed => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Require an admin identity. Must be layered after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .ok_or_else(AppError::unauthorized)?;

    if !identity.is_admin {
        tracing::warn!(
            subject = %identity.subject_id,
            uri = %req.uri(),
            "admin access denied"
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
