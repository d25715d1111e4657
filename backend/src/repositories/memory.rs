use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{
    CropCount, CropProfile, Limit, NewCrop, NewRecommendation, RecommendationRecord,
    RecommendationSummary, SoilReading, SoilSample, WeatherReading,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CropCatalog, RecommendationRepository, SoilReadingRepository, WeatherReadingRepository};
use crate::error::AppResult;
use crate::external::WeatherObservation;

/// Newest first; rows sharing a timestamp keep reverse insertion order
fn newest_first<T: Clone>(rows: &[T], recorded_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| recorded_at(b).cmp(&recorded_at(a)));
    out
}

fn take(limit: Limit) -> usize {
    usize::try_from(limit.get()).unwrap_or(0)
}

#[derive(Default)]
pub struct InMemoryCropCatalog {
    crops: RwLock<Vec<CropProfile>>,
}

impl InMemoryCropCatalog {
    /// Catalog pre-populated in the given order
    pub fn with_crops(crops: Vec<NewCrop>) -> Self {
        Self {
            crops: RwLock::new(
                crops
                    .into_iter()
                    .map(|crop| crop.into_profile(Uuid::new_v4()))
                    .collect(),
            ),
        }
    }

    async fn name_of(&self, id: Uuid) -> Option<String> {
        let crops = self.crops.read().await;
        crops.iter().find(|c| c.id == id).map(|c| c.name.clone())
    }
}

#[async_trait::async_trait]
impl CropCatalog for InMemoryCropCatalog {
    async fn list_all(&self) -> AppResult<Vec<CropProfile>> {
        Ok(self.crops.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CropProfile>> {
        let crops = self.crops.read().await;
        Ok(crops.iter().find(|c| c.id == id).cloned())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.crops.read().await.len() as i64)
    }

    async fn insert_all(&self, crops: Vec<NewCrop>) -> AppResult<Vec<CropProfile>> {
        let profiles: Vec<CropProfile> = crops
            .into_iter()
            .map(|crop| crop.into_profile(Uuid::new_v4()))
            .collect();
        self.crops.write().await.extend(profiles.iter().cloned());
        Ok(profiles)
    }
}

#[derive(Default)]
pub struct InMemorySoilReadingRepository {
    readings: RwLock<Vec<SoilReading>>,
}

#[async_trait::async_trait]
impl SoilReadingRepository for InMemorySoilReadingRepository {
    async fn insert(&self, user_id: Uuid, sample: &SoilSample) -> AppResult<SoilReading> {
        let reading = SoilReading {
            id: Uuid::new_v4(),
            user_id,
            nitrogen: sample.nitrogen,
            phosphorus: sample.phosphorus,
            potassium: sample.potassium,
            ph: sample.ph,
            moisture: sample.moisture,
            recorded_at: Utc::now(),
        };
        self.readings.write().await.push(reading.clone());
        Ok(reading)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: Limit) -> AppResult<Vec<SoilReading>> {
        let readings = self.readings.read().await;
        let owned: Vec<SoilReading> = readings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |r| r.recorded_at)
            .into_iter()
            .take(take(limit))
            .collect())
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SoilReading>> {
        let readings = self.readings.read().await;
        Ok(readings
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryWeatherReadingRepository {
    readings: RwLock<Vec<WeatherReading>>,
}

impl InMemoryWeatherReadingRepository {
    /// Store a reading as-is, including its timestamp
    pub async fn push(&self, reading: WeatherReading) {
        self.readings.write().await.push(reading);
    }

    pub async fn stored_count(&self) -> usize {
        self.readings.read().await.len()
    }
}

#[async_trait::async_trait]
impl WeatherReadingRepository for InMemoryWeatherReadingRepository {
    async fn latest_for_location(
        &self,
        location: &str,
        recorded_after: Option<DateTime<Utc>>,
    ) -> AppResult<Option<WeatherReading>> {
        let readings = self.readings.read().await;
        let matching: Vec<WeatherReading> = readings
            .iter()
            .filter(|r| r.location == location)
            .filter(|r| recorded_after.map_or(true, |after| r.recorded_at >= after))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |r| r.recorded_at).into_iter().next())
    }

    async fn insert(
        &self,
        location: &str,
        observation: &WeatherObservation,
    ) -> AppResult<WeatherReading> {
        let reading = WeatherReading {
            id: Uuid::new_v4(),
            location: location.to_string(),
            temperature: observation.temperature,
            humidity: observation.humidity,
            rainfall: observation.rainfall,
            recorded_at: Utc::now(),
        };
        self.readings.write().await.push(reading.clone());
        Ok(reading)
    }

    async fn list_recent(
        &self,
        location: Option<&str>,
        limit: Limit,
    ) -> AppResult<Vec<WeatherReading>> {
        let readings = self.readings.read().await;
        let matching: Vec<WeatherReading> = readings
            .iter()
            .filter(|r| location.map_or(true, |l| r.location == l))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |r| r.recorded_at)
            .into_iter()
            .take(take(limit))
            .collect())
    }
}

/// Recommendation store resolving crop names through an in-memory catalog
pub struct InMemoryRecommendationRepository {
    catalog: Arc<InMemoryCropCatalog>,
    records: RwLock<Vec<RecommendationRecord>>,
}

impl InMemoryRecommendationRepository {
    pub fn new(catalog: Arc<InMemoryCropCatalog>) -> Self {
        Self {
            catalog,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Every stored record, oldest first
    pub async fn records(&self) -> Vec<RecommendationRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait::async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn insert(&self, recommendation: NewRecommendation) -> AppResult<RecommendationRecord> {
        let record = RecommendationRecord {
            id: Uuid::new_v4(),
            user_id: recommendation.user_id,
            crop_id: recommendation.crop_id,
            confidence_score: recommendation.confidence_score,
            recommended_at: recommendation.recommended_at.unwrap_or_else(Utc::now),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: Limit,
    ) -> AppResult<Vec<RecommendationSummary>> {
        let owned: Vec<RecommendationRecord> = {
            let records = self.records.read().await;
            records.iter().filter(|r| r.user_id == user_id).cloned().collect()
        };

        let mut summaries = Vec::new();
        for record in newest_first(&owned, |r| r.recommended_at) {
            if summaries.len() == take(limit) {
                break;
            }
            // Records whose crop is unknown drop out, as with an inner join.
            if let Some(crop_name) = self.catalog.name_of(record.crop_id).await {
                summaries.push(RecommendationSummary {
                    id: record.id,
                    crop_name,
                    confidence_score: record.confidence_score,
                    recommended_at: record.recommended_at,
                });
            }
        }
        Ok(summaries)
    }

    async fn top_crops(&self, limit: Limit) -> AppResult<Vec<CropCount>> {
        let crop_ids: Vec<Uuid> = self.records.read().await.iter().map(|r| r.crop_id).collect();

        let mut counts: HashMap<String, i64> = HashMap::new();
        for crop_id in crop_ids {
            if let Some(name) = self.catalog.name_of(crop_id).await {
                *counts.entry(name).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<CropCount> = counts
            .into_iter()
            .map(|(crop_name, count)| CropCount { crop_name, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.crop_name.cmp(&b.crop_name)));
        ranked.truncate(take(limit));
        Ok(ranked)
    }
}
