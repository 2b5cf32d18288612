//! Shared types for the gallery backend
//!
//! Error codes, the unified API response envelope, and small utility
//! helpers used by the server crate.

pub mod error;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
