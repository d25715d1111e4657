//! HTTP handlers for the crop catalog

use axum::{
    extract::{Path, State},
    Json,
};
use shared::CropProfile;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// List all crops
pub async fn list_crops(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<CropProfile>>> {
    let crops = state.crop_service().list_crops().await?;
    Ok(Json(crops))
}

/// Get a crop by ID
pub async fn get_crop(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(crop_id): Path<Uuid>,
) -> AppResult<Json<CropProfile>> {
    let crop = state.crop_service().get_crop(crop_id).await?;
    Ok(Json(crop))
}
