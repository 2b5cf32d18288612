//! Contact message endpoints — public submission, admin inbox

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::Identity;
use crate::db;
use crate::db::contacts::ContactMessage;
use crate::state::AppState;

/// Statuses a message can move through
const MESSAGE_STATUSES: &[&str] = &["new", "read", "replied"];

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Where the message came from (contact form, chat widget, ...)
    pub source: Option<String>,
}

/// POST /api/contact (public)
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> ApiResult<serde_json::Value> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.message.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, "Missing required fields").into(),
        );
    }

    let source = req.source.as_deref().unwrap_or("contact_form");

    let id = db::contacts::create(
        &state.pool,
        req.name.trim(),
        req.email.trim(),
        req.phone.as_deref(),
        req.message.trim(),
        source,
        shared::util::now_millis(),
    )
    .await?;

    tracing::info!(message_id = id, source = %source, "contact message received");

    Ok(Json(serde_json::json!({ "success": true, "message_id": id })))
}

#[derive(serde::Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ContactMessage>,
}

/// GET /messages (admin)
pub async fn list_messages(
    State(state): State<AppState>,
    _identity: Identity,
) -> ApiResult<MessagesResponse> {
    let messages = db::contacts::list_all(&state.pool).await?;
    Ok(Json(MessagesResponse { messages }))
}

#[derive(Deserialize)]
pub struct UpdateMessageRequest {
    pub status: String,
}

/// PUT /messages/{id} (admin)
pub async fn update_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> ApiResult<serde_json::Value> {
    if !MESSAGE_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::validation("Invalid message status").into());
    }

    let updated = db::contacts::update_status(&state.pool, id, &req.status).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::MessageNotFound).into());
    }

    tracing::info!(
        message_id = id,
        status = %req.status,
        admin = %identity.subject_id,
        "contact message status updated"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
