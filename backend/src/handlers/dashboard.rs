//! HTTP handlers for dashboard chart data

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{AdminDashboard, FarmerDashboard, OfficerDashboard};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Soil trend and recent recommendations for the caller
pub async fn farmer_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<FarmerDashboard>> {
    let dashboard = state
        .dashboard_service()
        .farmer(current_user.0.user_id)
        .await?;
    Ok(Json(dashboard))
}

#[derive(Debug, Deserialize)]
pub struct OfficerQuery {
    pub location: Option<String>,
}

/// Weather trend, for officers and admins
pub async fn officer_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<OfficerQuery>,
) -> AppResult<Json<OfficerDashboard>> {
    current_user.0.require_officer()?;
    let dashboard = state
        .dashboard_service()
        .officer(query.location.as_deref())
        .await?;
    Ok(Json(dashboard))
}

/// Top recommended crops, admin only
pub async fn admin_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<AdminDashboard>> {
    current_user.0.require_admin()?;
    let dashboard = state
        .dashboard_service()
        .admin(state.config.recommendation.top_crops_limit)
        .await?;
    Ok(Json(dashboard))
}
