//! HTTP handlers for soil readings

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{Limit, SoilReading, SoilSample};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Default number of soil readings listed
pub const DEFAULT_SOIL_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct SoilListQuery {
    pub limit: Option<i64>,
}

/// Record a soil reading
pub async fn create_soil_reading(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(sample): Json<SoilSample>,
) -> AppResult<(StatusCode, Json<SoilReading>)> {
    let reading = state
        .soil_service()
        .record(current_user.0.user_id, sample)
        .await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// List the caller's soil readings, newest first
pub async fn list_soil_readings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SoilListQuery>,
) -> AppResult<Json<Vec<SoilReading>>> {
    let readings = state
        .soil_service()
        .list(
            current_user.0.user_id,
            Limit::resolve(query.limit, DEFAULT_SOIL_LIMIT),
        )
        .await?;
    Ok(Json(readings))
}

/// Get one of the caller's soil readings
pub async fn get_soil_reading(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(reading_id): Path<Uuid>,
) -> AppResult<Json<SoilReading>> {
    let reading = state
        .soil_service()
        .get(current_user.0.user_id, reading_id)
        .await?;
    Ok(Json(reading))
}
