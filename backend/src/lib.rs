//! Crop Recommendation Platform - Backend library
//!
//! Recommends crops from soil measurements and live rainfall, keeps an
//! auditable history of recommendations, and caches weather readings per
//! location.

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{WeatherClient, WeatherProvider};
use repositories::{
    CropCatalog, RecommendationRepository, SoilReadingRepository, SqlCropCatalog,
    SqlRecommendationRepository, SqlSoilReadingRepository, SqlWeatherReadingRepository,
    WeatherReadingRepository,
};
use services::{CropService, DashboardService, RecommendationService, SoilService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub crops: Arc<dyn CropCatalog>,
    pub soil_readings: Arc<dyn SoilReadingRepository>,
    pub weather_readings: Arc<dyn WeatherReadingRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
    pub weather_provider: Arc<dyn WeatherProvider>,
}

/// Stores and the weather provider behind an [`AppState`]
pub struct StateParts {
    pub crops: Arc<dyn CropCatalog>,
    pub soil_readings: Arc<dyn SoilReadingRepository>,
    pub weather_readings: Arc<dyn WeatherReadingRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
    pub weather_provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    /// Postgres-backed stores and the OpenWeatherMap client
    pub fn new(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let weather_client = WeatherClient::new(&config.weather)?;
        let parts = StateParts {
            crops: Arc::new(SqlCropCatalog::new(db.clone())),
            soil_readings: Arc::new(SqlSoilReadingRepository::new(db.clone())),
            weather_readings: Arc::new(SqlWeatherReadingRepository::new(db.clone())),
            recommendations: Arc::new(SqlRecommendationRepository::new(db.clone())),
            weather_provider: Arc::new(weather_client),
        };
        Ok(Self::from_parts(db, config, parts))
    }

    pub fn from_parts(db: PgPool, config: Config, parts: StateParts) -> Self {
        Self {
            db,
            config: Arc::new(config),
            crops: parts.crops,
            soil_readings: parts.soil_readings,
            weather_readings: parts.weather_readings,
            recommendations: parts.recommendations,
            weather_provider: parts.weather_provider,
        }
    }

    pub fn crop_service(&self) -> CropService {
        CropService::new(self.crops.clone())
    }

    pub fn soil_service(&self) -> SoilService {
        SoilService::new(self.soil_readings.clone())
    }

    pub fn weather_service(&self) -> WeatherService {
        WeatherService::new(self.weather_readings.clone(), self.weather_provider.clone())
            .with_cache_max_age(self.config.weather.cache_max_age_minutes)
    }

    pub fn recommendation_service(&self) -> RecommendationService {
        RecommendationService::new(
            self.crops.clone(),
            self.recommendations.clone(),
            self.weather_service(),
        )
    }

    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService::new(
            self.soil_readings.clone(),
            self.weather_readings.clone(),
            self.recommendations.clone(),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Recommendation Platform API v1.0"
}
