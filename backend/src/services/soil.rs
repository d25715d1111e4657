//! Soil reading service

use std::sync::Arc;

use shared::{validate_soil_finite, Limit, SoilReading, SoilSample};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repositories::SoilReadingRepository;

/// Soil reading service
#[derive(Clone)]
pub struct SoilService {
    readings: Arc<dyn SoilReadingRepository>,
}

impl SoilService {
    pub fn new(readings: Arc<dyn SoilReadingRepository>) -> Self {
        Self { readings }
    }

    /// Record a soil sample for a user
    pub async fn record(&self, user_id: Uuid, sample: SoilSample) -> AppResult<SoilReading> {
        sample.validate()?;
        validate_soil_finite(&sample).map_err(|message| AppError::Validation {
            field: "soil_data".to_string(),
            message: message.to_string(),
        })?;

        let reading = self.readings.insert(user_id, &sample).await?;
        tracing::info!(%user_id, reading_id = %reading.id, "Soil reading recorded");
        Ok(reading)
    }

    /// List the user's readings, newest first
    pub async fn list(&self, user_id: Uuid, limit: Limit) -> AppResult<Vec<SoilReading>> {
        self.readings.list_for_user(user_id, limit).await
    }

    /// Get one of the user's readings
    pub async fn get(&self, user_id: Uuid, reading_id: Uuid) -> AppResult<SoilReading> {
        self.readings
            .find_for_user(user_id, reading_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Soil reading {}", reading_id)))
    }
}
