//! Session token service
//!
//! Issues and verifies the signed, self-contained session tokens that every
//! authorization decision downstream trusts. Tokens carry the subject id,
//! display name, admin flag and an absolute expiry; nothing is stored
//! server-side and there is no refresh or revocation. Rotating the signing
//! secret invalidates every outstanding token.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed token lifetime: issuance + 24 hours
const TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT claims stored in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id, stringified)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Admin flag
    pub is_admin: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: i64,
}

/// Authenticated principal reconstructed from a verified token
///
/// Request-scoped: created by the authorization gate, injected into the
/// handler, dropped when the request completes. The admin flag is never
/// re-derived from storage after issuance — a signed token is authoritative
/// for its full validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account id (from the `sub` claim)
    pub subject_id: String,
    /// Display name
    pub display_name: String,
    /// Admin flag
    pub is_admin: bool,
    /// Expiry (Unix timestamp seconds)
    pub expires_at: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            display_name: claims.name,
            is_admin: claims.is_admin,
            expires_at: claims.exp,
        }
    }
}

/// Token verification failure
///
/// Exactly two outcomes: the token was valid once but its expiry instant has
/// passed, or it never verifies at all (bad signature, unparsable claims,
/// algorithm mismatch).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Stateless issuer/verifier over a single process-wide secret
///
/// The secret is injected at construction (loaded from configuration at
/// startup), never a hardcoded literal.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenService {
    /// Create a token service from the configured signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(TOKEN_EXPIRY_HOURS),
        }
    }

    /// Issue a signed session token for an account
    pub fn issue(
        &self,
        subject_id: &str,
        display_name: &str,
        is_admin: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: subject_id.to_string(),
            name: display_name.to_string(),
            is_admin,
            exp: (Utc::now() + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token and reconstruct the identity it encodes
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-at-least-32-bytes!!")
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service();

        let token = tokens
            .issue("42", "Jane Curator", false)
            .expect("Failed to issue token");
        let identity = tokens.verify(&token).expect("Failed to verify token");

        assert_eq!(identity.subject_id, "42");
        assert_eq!(identity.display_name, "Jane Curator");
        assert!(!identity.is_admin);
        assert!(identity.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_admin_flag_preserved() {
        let tokens = service();

        let token = tokens.issue("1", "Site Admin", true).unwrap();
        let identity = tokens.verify(&token).unwrap();

        assert!(identity.is_admin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();

        // Sign a claim set whose expiry is already in the past
        let claims = Claims {
            sub: "42".into(),
            name: "Jane Curator".into(),
            is_admin: false,
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding_key).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let tokens = service();

        let mut token = tokens.issue("42", "Jane Curator", false).unwrap();
        // Flip the last character of the signature segment
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(tokens.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = service();
        assert_eq!(tokens.verify("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_secret_rotation_invalidates_tokens() {
        let old = TokenService::new("old-secret-key-at-least-32-bytes!!!");
        let new = TokenService::new("new-secret-key-at-least-32-bytes!!!");

        let token = old.issue("42", "Jane Curator", true).unwrap();

        assert_eq!(new.verify(&token), Err(TokenError::Malformed));
    }
}
