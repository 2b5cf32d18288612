//! Payment initiation — authenticated pass-through to the mobile-money API

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::Identity;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StkPushRequest {
    pub phone_number: String,
    pub amount: u64,
    pub account_reference: Option<String>,
    pub order_type: Option<String>,
    pub order_id: Option<i64>,
}

/// POST /api/payments/initiate (authenticated)
pub async fn initiate(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<StkPushRequest>,
) -> ApiResult<serde_json::Value> {
    let phone = req.phone_number.trim();
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::new(ErrorCode::PaymentInvalidPhone).into());
    }
    if req.amount == 0 {
        return Err(AppError::new(ErrorCode::PaymentInvalidAmount).into());
    }

    let reference = req.account_reference.clone().unwrap_or_else(|| {
        format!(
            "{}-{}",
            req.order_type.as_deref().unwrap_or("order"),
            req.order_id.unwrap_or_default()
        )
    });

    let response = state
        .payments
        .stk_push(phone, req.amount, &reference, "Gallery payment")
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        subject = %identity.subject_id,
        amount = req.amount,
        reference = %reference,
        "payment initiated"
    );

    Ok(Json(response))
}
