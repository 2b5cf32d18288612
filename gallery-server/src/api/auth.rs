//! Account endpoints: register, login, admin login
//!
//! Users and admins live in two disjoint tables; both receive the same token
//! shape, differing only in the admin claim. The admin flag is baked into the
//! token at issuance and never re-checked against the database during the
//! token's validity window.

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::{hash_password, verify_password};
use crate::db;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(serde::Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub name: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).into());
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }
    if db::users::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user_id = db::users::create(
        &state.pool,
        name,
        &email,
        &password_hash,
        req.phone.as_deref(),
        shared::util::now_millis(),
    )
    .await?;

    let token = issue_token(&state, user_id, name, false)?;

    tracing::info!(user_id, "user registered");

    Ok(Json(AuthResponse {
        token,
        user_id,
        name: name.to_string(),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = issue_token(&state, user.id, &user.name, false)?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        name: user.name,
    }))
}

#[derive(serde::Serialize)]
pub struct AdminAuthResponse {
    pub token: String,
    pub admin_id: i64,
    pub name: String,
}

/// POST /admin-login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AdminAuthResponse> {
    let email = req.email.trim().to_lowercase();

    let admin = db::admins::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &admin.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = issue_token(&state, admin.id, &admin.name, true)?;

    tracing::info!(admin_id = admin.id, "admin login");

    Ok(Json(AdminAuthResponse {
        token,
        admin_id: admin.id,
        name: admin.name,
    }))
}

fn issue_token(
    state: &AppState,
    account_id: i64,
    name: &str,
    is_admin: bool,
) -> Result<String, AppError> {
    state
        .tokens
        .issue(&account_id.to_string(), name, is_admin)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })
}
