//! Crop catalog service

use std::sync::Arc;

use shared::{default_crop_catalog, validate_new_crop, CropProfile, NewCrop};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repositories::CropCatalog;

/// Crop catalog service
#[derive(Clone)]
pub struct CropService {
    crops: Arc<dyn CropCatalog>,
}

impl CropService {
    pub fn new(crops: Arc<dyn CropCatalog>) -> Self {
        Self { crops }
    }

    /// List all crops in catalog order
    pub async fn list_crops(&self) -> AppResult<Vec<CropProfile>> {
        self.crops.list_all().await
    }

    /// Get a crop by ID
    pub async fn get_crop(&self, crop_id: Uuid) -> AppResult<CropProfile> {
        self.crops
            .find_by_id(crop_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id)))
    }

    /// Insert the default catalog when no crops exist yet; returns how many were added
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        self.seed_if_empty(default_crop_catalog()).await
    }

    /// Insert `crops` as one unit when the catalog is empty
    pub async fn seed_if_empty(&self, crops: Vec<NewCrop>) -> AppResult<usize> {
        if self.crops.count().await? > 0 {
            tracing::debug!("Crop catalog already populated, skipping seed");
            return Ok(0);
        }

        for crop in &crops {
            validate_new_crop(crop).map_err(|message| AppError::Validation {
                field: crop.name.clone(),
                message: message.to_string(),
            })?;
        }

        let inserted = self.crops.insert_all(crops).await?;
        tracing::info!(count = inserted.len(), "Seeded crop catalog");
        Ok(inserted.len())
    }
}
