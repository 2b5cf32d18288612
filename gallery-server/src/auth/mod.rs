//! Authentication and authorization
//!
//! - [`jwt`]: session token issue/verify (the trust root)
//! - [`extractor`]: pulling a token out of the authorization header
//! - [`middleware`]: the authorization gate (401/403) around protected routes
//! - [`password`]: Argon2 credential hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Identity, TokenError, TokenService};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
