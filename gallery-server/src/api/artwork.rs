//! Artwork endpoints — public reads, admin-gated writes
//!
//! The image field of a write payload is either an already-stored reference
//! or an inline data URI; the latter is routed through the image store before
//! the record is persisted.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::Identity;
use crate::db;
use crate::db::artworks::{Artwork, ArtworkInput};
use crate::state::AppState;
use crate::upload::ImageStore;

#[derive(serde::Serialize)]
pub struct ArtworksResponse {
    pub artworks: Vec<Artwork>,
}

/// GET /api/artworks
pub async fn list_artworks(State(state): State<AppState>) -> ApiResult<ArtworksResponse> {
    let artworks = db::artworks::list_all(&state.pool).await?;
    Ok(Json(ArtworksResponse { artworks }))
}

/// GET /api/artworks/{id}
pub async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Artwork> {
    let artwork = db::artworks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ArtworkNotFound))?;
    Ok(Json(artwork))
}

#[derive(Deserialize)]
pub struct ArtworkPayload {
    pub title: String,
    pub artist: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// Clients send this field camelCase; the rest of the payload is snake_case
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

impl ArtworkPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() || self.artist.trim().is_empty() {
            return Err(AppError::new(ErrorCode::RequiredField));
        }
        Ok(())
    }

    fn as_input(&self) -> ArtworkInput<'_> {
        ArtworkInput {
            title: self.title.trim(),
            artist: self.artist.trim(),
            description: self.description.as_deref(),
            price: self.price,
            image_url: self.image_url.as_deref(),
            dimensions: self.dimensions.as_deref(),
            medium: self.medium.as_deref(),
            year: self.year,
            status: self.status.as_deref(),
        }
    }
}

/// POST /api/artworks (admin)
pub async fn create_artwork(
    State(state): State<AppState>,
    identity: Identity,
    Json(mut payload): Json<ArtworkPayload>,
) -> ApiResult<serde_json::Value> {
    payload.validate()?;
    store_inline_image(&state, &mut payload.image_url).await?;

    let id = db::artworks::create(&state.pool, &payload.as_input(), shared::util::now_millis())
        .await?;

    tracing::info!(artwork_id = id, admin = %identity.subject_id, "artwork created");

    Ok(Json(serde_json::json!({ "success": true, "artwork_id": id })))
}

/// PUT /api/artworks/{id} (admin)
pub async fn update_artwork(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(mut payload): Json<ArtworkPayload>,
) -> ApiResult<serde_json::Value> {
    payload.validate()?;
    store_inline_image(&state, &mut payload.image_url).await?;

    let updated = db::artworks::update(&state.pool, id, &payload.as_input()).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::ArtworkNotFound).into());
    }

    tracing::info!(artwork_id = id, admin = %identity.subject_id, "artwork updated");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/artworks/{id} (admin)
pub async fn delete_artwork(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::artworks::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ArtworkNotFound).into());
    }

    tracing::info!(artwork_id = id, admin = %identity.subject_id, "artwork deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Replace an inline data-URI image with its stored reference, in place.
/// Already-stored references pass through untouched.
pub(super) async fn store_inline_image(
    state: &AppState,
    image_url: &mut Option<String>,
) -> Result<(), AppError> {
    if let Some(image) = image_url.as_deref() {
        if ImageStore::is_data_uri(image) {
            let stored = state.images.ingest(image).await?;
            *image_url = Some(stored);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_camelcase_image_field() {
        let payload: ArtworkPayload = serde_json::from_str(
            r#"{"title":"Dusk","artist":"J. Moraa","imageUrl":"data:image/png;base64,aGVsbG8="}"#,
        )
        .unwrap();
        assert_eq!(
            payload.image_url.as_deref(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }

    #[test]
    fn test_payload_accepts_snake_case_image_field() {
        let payload: ArtworkPayload = serde_json::from_str(
            r#"{"title":"Dusk","artist":"J. Moraa","image_url":"/static/uploads/a.png"}"#,
        )
        .unwrap();
        assert_eq!(payload.image_url.as_deref(), Some("/static/uploads/a.png"));
    }
}
