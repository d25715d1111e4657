//! HTTP handlers for crop recommendations

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Limit, RecommendationRequest, RecommendationResult, RecommendationSummary};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Recommend a crop for the submitted soil data
pub async fn create_recommendation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResult>> {
    let result = state
        .recommendation_service()
        .recommend(current_user.0.user_id, request)
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// The caller's recommendations, newest first
pub async fn list_recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<RecommendationSummary>>> {
    let limit = Limit::resolve(query.limit, state.config.recommendation.history_limit);
    let history = state
        .recommendation_service()
        .history(current_user.0.user_id, limit)
        .await?;
    Ok(Json(history))
}
