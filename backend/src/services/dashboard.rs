//! Dashboard aggregation for farmers, officers and admins

use std::sync::Arc;

use shared::{normalize_location, AdminDashboard, FarmerDashboard, Limit, OfficerDashboard};
use uuid::Uuid;

use crate::error::AppResult;
use crate::repositories::{RecommendationRepository, SoilReadingRepository, WeatherReadingRepository};

/// Soil readings shown on the farmer dashboard
pub const FARMER_SOIL_POINTS: i64 = 20;
/// Recommendations shown on the farmer dashboard
pub const FARMER_RECOMMENDATIONS: i64 = 10;
/// Weather readings shown on the officer dashboard
pub const OFFICER_WEATHER_POINTS: i64 = 20;

#[derive(Clone)]
pub struct DashboardService {
    soil: Arc<dyn SoilReadingRepository>,
    weather: Arc<dyn WeatherReadingRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
}

impl DashboardService {
    pub fn new(
        soil: Arc<dyn SoilReadingRepository>,
        weather: Arc<dyn WeatherReadingRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            soil,
            weather,
            recommendations,
        }
    }

    pub async fn farmer(&self, user_id: Uuid) -> AppResult<FarmerDashboard> {
        let soil = self
            .soil
            .list_for_user(user_id, Limit::resolve(None, FARMER_SOIL_POINTS))
            .await?;
        let recommendations = self
            .recommendations
            .list_for_user(user_id, Limit::resolve(None, FARMER_RECOMMENDATIONS))
            .await?;

        Ok(FarmerDashboard::new(&soil, recommendations))
    }

    /// Weather trend for one location, or across all locations when blank
    pub async fn officer(&self, location: Option<&str>) -> AppResult<OfficerDashboard> {
        let readings = self
            .weather
            .list_recent(
                normalize_location(location),
                Limit::resolve(None, OFFICER_WEATHER_POINTS),
            )
            .await?;

        Ok(OfficerDashboard::from(readings.as_slice()))
    }

    pub async fn admin(&self, top_crops_limit: i64) -> AppResult<AdminDashboard> {
        let counts = self
            .recommendations
            .top_crops(Limit::resolve(None, top_crops_limit))
            .await?;
        Ok(AdminDashboard::from(counts))
    }
}
