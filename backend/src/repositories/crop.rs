//! Postgres-backed crop catalog

use async_trait::async_trait;
use shared::{CropProfile, IdealRange, NewCrop};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::CropCatalog;
use crate::error::AppResult;

#[derive(Clone)]
pub struct SqlCropCatalog {
    db: PgPool,
}

impl SqlCropCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Crop row as stored
#[derive(Debug, FromRow)]
struct CropRow {
    id: Uuid,
    crop_name: String,
    nitrogen_min: f64,
    nitrogen_max: f64,
    phosphorus_min: f64,
    phosphorus_max: f64,
    potassium_min: f64,
    potassium_max: f64,
    ph_min: f64,
    ph_max: f64,
    rainfall_min: f64,
    rainfall_max: f64,
}

impl From<CropRow> for CropProfile {
    fn from(row: CropRow) -> Self {
        CropProfile {
            id: row.id,
            name: row.crop_name,
            nitrogen: IdealRange::new(row.nitrogen_min, row.nitrogen_max),
            phosphorus: IdealRange::new(row.phosphorus_min, row.phosphorus_max),
            potassium: IdealRange::new(row.potassium_min, row.potassium_max),
            ph: IdealRange::new(row.ph_min, row.ph_max),
            rainfall: IdealRange::new(row.rainfall_min, row.rainfall_max),
        }
    }
}

const CROP_COLUMNS: &str = "id, crop_name, nitrogen_min, nitrogen_max, phosphorus_min, \
     phosphorus_max, potassium_min, potassium_max, ph_min, ph_max, rainfall_min, rainfall_max";

#[async_trait]
impl CropCatalog for SqlCropCatalog {
    async fn list_all(&self) -> AppResult<Vec<CropProfile>> {
        let rows = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops ORDER BY catalog_order ASC",
            CROP_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CropProfile::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CropProfile>> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops WHERE id = $1",
            CROP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(CropProfile::from))
    }

    async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM crops")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    async fn insert_all(&self, crops: Vec<NewCrop>) -> AppResult<Vec<CropProfile>> {
        let mut tx = self.db.begin().await?;
        let mut inserted = Vec::with_capacity(crops.len());

        for crop in crops {
            let row = sqlx::query_as::<_, CropRow>(&format!(
                r#"
                INSERT INTO crops (
                    crop_name, nitrogen_min, nitrogen_max, phosphorus_min, phosphorus_max,
                    potassium_min, potassium_max, ph_min, ph_max, rainfall_min, rainfall_max
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING {}
                "#,
                CROP_COLUMNS
            ))
            .bind(&crop.name)
            .bind(crop.nitrogen.min)
            .bind(crop.nitrogen.max)
            .bind(crop.phosphorus.min)
            .bind(crop.phosphorus.max)
            .bind(crop.potassium.min)
            .bind(crop.potassium.max)
            .bind(crop.ph.min)
            .bind(crop.ph.max)
            .bind(crop.rainfall.min)
            .bind(crop.rainfall.max)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(CropProfile::from(row));
        }

        // Dropping `tx` on an early return rolls every insert back.
        tx.commit().await?;
        Ok(inserted)
    }
}
