//! Crop recommendation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::soil::SoilSample;

/// Request for a crop recommendation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate]
    pub soil_data: SoilSample,
    /// City name used to look up rainfall; omitted or blank means rainfall 0
    pub location: Option<String>,
}

/// Persisted, immutable recommendation record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub crop_id: Uuid,
    /// Percentage in {0, 20, 40, 60, 80, 100}
    pub confidence_score: f64,
    pub recommended_at: DateTime<Utc>,
}

/// Input for appending a recommendation record
#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub user_id: Uuid,
    pub crop_id: Uuid,
    pub confidence_score: f64,
    /// Defaults to the insert time when absent
    pub recommended_at: Option<DateTime<Utc>>,
}

/// Outcome of a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    /// Absent when nothing was persisted (empty catalog)
    pub recommendation_id: Option<Uuid>,
    pub crop_name: String,
    pub confidence_score: f64,
    pub message: String,
}

impl RecommendationResult {
    /// Crop name reported when the catalog has no crops
    pub const NO_CROP: &'static str = "N/A";

    pub fn empty_catalog() -> Self {
        Self {
            recommendation_id: None,
            crop_name: Self::NO_CROP.to_string(),
            confidence_score: 0.0,
            message: "No crops in database. Please add crop data first.".to_string(),
        }
    }
}

/// Recommendation history entry joined with its crop name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSummary {
    pub id: Uuid,
    pub crop_name: String,
    pub confidence_score: f64,
    pub recommended_at: DateTime<Utc>,
}

/// Number of recommendations that chose a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropCount {
    pub crop_name: String,
    pub count: i64,
}
