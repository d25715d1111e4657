//! Persistence contracts for catalog, readings and recommendations
//!
//! Each store is a trait so services can run against Postgres in production
//! and against the in-memory implementations in tests. Every store is
//! append-only from the point of view of the services: no update or delete
//! operation is exposed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    CropCount, CropProfile, Limit, NewCrop, NewRecommendation, RecommendationRecord,
    RecommendationSummary, SoilReading, SoilSample, WeatherReading,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::external::WeatherObservation;

pub mod crop;
pub mod memory;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use crop::SqlCropCatalog;
pub use memory::{
    InMemoryCropCatalog, InMemoryRecommendationRepository, InMemorySoilReadingRepository,
    InMemoryWeatherReadingRepository,
};
pub use recommendation::SqlRecommendationRepository;
pub use soil::SqlSoilReadingRepository;
pub use weather::SqlWeatherReadingRepository;

/// Read-mostly crop reference data
#[async_trait]
pub trait CropCatalog: Send + Sync {
    /// All crops in catalog order
    async fn list_all(&self) -> AppResult<Vec<CropProfile>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CropProfile>>;

    async fn count(&self) -> AppResult<i64>;

    /// Insert crops as one unit, preserving their order
    async fn insert_all(&self, crops: Vec<NewCrop>) -> AppResult<Vec<CropProfile>>;
}

#[async_trait]
pub trait SoilReadingRepository: Send + Sync {
    async fn insert(&self, user_id: Uuid, sample: &SoilSample) -> AppResult<SoilReading>;

    /// Newest first
    async fn list_for_user(&self, user_id: Uuid, limit: Limit) -> AppResult<Vec<SoilReading>>;

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SoilReading>>;
}

#[async_trait]
pub trait WeatherReadingRepository: Send + Sync {
    /// Most recent reading for `location`, optionally ignoring readings recorded before `recorded_after`
    async fn latest_for_location(
        &self,
        location: &str,
        recorded_after: Option<DateTime<Utc>>,
    ) -> AppResult<Option<WeatherReading>>;

    /// Append a new reading; existing rows are never touched
    async fn insert(
        &self,
        location: &str,
        observation: &WeatherObservation,
    ) -> AppResult<WeatherReading>;

    /// Newest first, for one location or across all locations
    async fn list_recent(
        &self,
        location: Option<&str>,
        limit: Limit,
    ) -> AppResult<Vec<WeatherReading>>;
}

#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn insert(&self, recommendation: NewRecommendation) -> AppResult<RecommendationRecord>;

    /// Newest first, joined with crop names
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: Limit,
    ) -> AppResult<Vec<RecommendationSummary>>;

    /// Crops ordered by how often they were recommended, across all users
    async fn top_crops(&self, limit: Limit) -> AppResult<Vec<CropCount>>;
}
