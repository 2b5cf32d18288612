//! Exhibition endpoints — public reads, admin-gated writes
//!
//! Wire format is camelCase (the frontend's convention for exhibitions),
//! unlike the artwork endpoints which stay snake_case.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use super::artwork::store_inline_image;
use crate::auth::Identity;
use crate::db;
use crate::db::exhibitions::{Exhibition, ExhibitionInput};
use crate::state::AppState;

#[derive(serde::Serialize)]
pub struct ExhibitionsResponse {
    pub exhibitions: Vec<Exhibition>,
}

/// GET /api/exhibitions
pub async fn list_exhibitions(State(state): State<AppState>) -> ApiResult<ExhibitionsResponse> {
    let exhibitions = db::exhibitions::list_all(&state.pool).await?;
    Ok(Json(ExhibitionsResponse { exhibitions }))
}

/// GET /api/exhibitions/{id}
pub async fn get_exhibition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Exhibition> {
    let exhibition = db::exhibitions::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ExhibitionNotFound))?;
    Ok(Json(exhibition))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionPayload {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub ticket_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub total_slots: Option<i32>,
    pub available_slots: Option<i32>,
    pub status: Option<String>,
}

impl ExhibitionPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::new(ErrorCode::RequiredField));
        }
        Ok(())
    }

    fn as_input(&self) -> ExhibitionInput<'_> {
        ExhibitionInput {
            title: self.title.trim(),
            description: self.description.as_deref(),
            location: self.location.as_deref(),
            start_date: self.start_date.as_deref(),
            end_date: self.end_date.as_deref(),
            ticket_price: self.ticket_price,
            image_url: self.image_url.as_deref(),
            total_slots: self.total_slots,
            // A new exhibition starts fully available unless told otherwise
            available_slots: self.available_slots.or(self.total_slots),
            status: self.status.as_deref(),
        }
    }
}

/// POST /api/exhibitions (admin)
pub async fn create_exhibition(
    State(state): State<AppState>,
    identity: Identity,
    Json(mut payload): Json<ExhibitionPayload>,
) -> ApiResult<serde_json::Value> {
    payload.validate()?;
    store_inline_image(&state, &mut payload.image_url).await?;

    let id = db::exhibitions::create(
        &state.pool,
        &payload.as_input(),
        shared::util::now_millis(),
    )
    .await?;

    tracing::info!(exhibition_id = id, admin = %identity.subject_id, "exhibition created");

    Ok(Json(
        serde_json::json!({ "success": true, "exhibition_id": id }),
    ))
}

/// PUT /api/exhibitions/{id} (admin)
pub async fn update_exhibition(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(mut payload): Json<ExhibitionPayload>,
) -> ApiResult<serde_json::Value> {
    payload.validate()?;
    store_inline_image(&state, &mut payload.image_url).await?;

    let updated = db::exhibitions::update(&state.pool, id, &payload.as_input()).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::ExhibitionNotFound).into());
    }

    tracing::info!(exhibition_id = id, admin = %identity.subject_id, "exhibition updated");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/exhibitions/{id} (admin)
pub async fn delete_exhibition(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::exhibitions::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ExhibitionNotFound).into());
    }

    tracing::info!(exhibition_id = id, admin = %identity.subject_id, "exhibition deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}
