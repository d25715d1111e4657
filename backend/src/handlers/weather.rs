//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{normalize_location, CurrentWeather, Limit, WeatherReading};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Default number of stored readings listed
pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    pub location: String,
}

/// Fetch live conditions for a location and store them
pub async fn get_current_weather(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<CurrentWeatherQuery>,
) -> AppResult<Json<CurrentWeather>> {
    tracing::debug!(user_id = %current_user.0.user_id, location = %query.location, "Current weather requested");
    let weather = state
        .weather_service()
        .current_weather(&query.location)
        .await?;
    Ok(Json(weather))
}

#[derive(Debug, Deserialize)]
pub struct WeatherHistoryQuery {
    pub location: Option<String>,
    pub limit: Option<i64>,
}

/// List stored weather readings, newest first
pub async fn get_weather_history(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<WeatherHistoryQuery>,
) -> AppResult<Json<Vec<WeatherReading>>> {
    let readings = state
        .weather_service()
        .history(
            normalize_location(query.location.as_deref()),
            Limit::resolve(query.limit, DEFAULT_HISTORY_LIMIT),
        )
        .await?;
    Ok(Json(readings))
}
