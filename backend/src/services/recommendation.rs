//! Recommendation service
//!
//! Scores every catalog crop against submitted soil values and the resolved
//! rainfall, then records the best match for the requesting user.

use std::sync::Arc;

use shared::{
    best_match, normalize_location, summary_message, validate_soil_finite, CropCount, Limit,
    NewRecommendation, RecommendationRequest, RecommendationResult, RecommendationSummary,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repositories::{CropCatalog, RecommendationRepository};
use crate::services::weather::WeatherService;

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    crops: Arc<dyn CropCatalog>,
    recommendations: Arc<dyn RecommendationRepository>,
    weather: WeatherService,
}

impl RecommendationService {
    pub fn new(
        crops: Arc<dyn CropCatalog>,
        recommendations: Arc<dyn RecommendationRepository>,
        weather: WeatherService,
    ) -> Self {
        Self {
            crops,
            recommendations,
            weather,
        }
    }

    /// Recommend a crop and persist the recommendation
    pub async fn recommend(
        &self,
        user_id: Uuid,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationResult> {
        request.validate()?;
        validate_soil_finite(&request.soil_data).map_err(|message| AppError::Validation {
            field: "soil_data".to_string(),
            message: message.to_string(),
        })?;

        let rainfall = match normalize_location(request.location.as_deref()) {
            Some(location) => self.rainfall_or_zero(user_id, location).await,
            None => 0.0,
        };

        let crops = self.crops.list_all().await?;
        let Some(best) = best_match(&crops, &request.soil_data, rainfall) else {
            tracing::warn!(%user_id, "Recommendation requested with an empty crop catalog");
            return Ok(RecommendationResult::empty_catalog());
        };

        let record = self
            .recommendations
            .insert(NewRecommendation {
                user_id,
                crop_id: best.crop.id,
                confidence_score: best.confidence,
                recommended_at: None,
            })
            .await?;

        tracing::info!(
            %user_id,
            crop = %best.crop.name,
            confidence = best.confidence,
            "Recommendation saved"
        );

        Ok(RecommendationResult {
            recommendation_id: Some(record.id),
            crop_name: best.crop.name.clone(),
            confidence_score: best.confidence,
            message: summary_message(&best.crop.name, best.confidence),
        })
    }

    // Weather problems never fail a recommendation.
    async fn rainfall_or_zero(&self, user_id: Uuid, location: &str) -> f64 {
        match self.weather.resolve_rainfall(location).await {
            Ok(resolved) => {
                tracing::debug!(
                    %user_id,
                    location,
                    source = %resolved.source,
                    rainfall = resolved.rainfall,
                    "Resolved rainfall"
                );
                resolved.rainfall
            }
            Err(e) => {
                tracing::warn!(
                    %user_id,
                    location,
                    error = %e,
                    "Could not resolve weather for recommendation, using rainfall 0"
                );
                0.0
            }
        }
    }

    /// The user's recommendations, newest first
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: Limit,
    ) -> AppResult<Vec<RecommendationSummary>> {
        self.recommendations.list_for_user(user_id, limit).await
    }

    /// Crop names by recommendation count across all users, descending
    pub async fn top_crops(&self, limit: Limit) -> AppResult<Vec<CropCount>> {
        self.recommendations.top_crops(limit).await
    }
}
