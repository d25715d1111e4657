//! Postgres-backed soil readings

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Limit, SoilReading, SoilSample};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::SoilReadingRepository;
use crate::error::AppResult;

#[derive(Clone)]
pub struct SqlSoilReadingRepository {
    db: PgPool,
}

impl SqlSoilReadingRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct SoilRow {
    id: Uuid,
    user_id: Uuid,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    ph: f64,
    moisture: f64,
    recorded_at: DateTime<Utc>,
}

impl From<SoilRow> for SoilReading {
    fn from(row: SoilRow) -> Self {
        SoilReading {
            id: row.id,
            user_id: row.user_id,
            nitrogen: row.nitrogen,
            phosphorus: row.phosphorus,
            potassium: row.potassium,
            ph: row.ph,
            moisture: row.moisture,
            recorded_at: row.recorded_at,
        }
    }
}

#[async_trait]
impl SoilReadingRepository for SqlSoilReadingRepository {
    async fn insert(&self, user_id: Uuid, sample: &SoilSample) -> AppResult<SoilReading> {
        let row = sqlx::query_as::<_, SoilRow>(
            r#"
            INSERT INTO soil_readings (user_id, nitrogen, phosphorus, potassium, ph, moisture)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, nitrogen, phosphorus, potassium, ph, moisture, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(sample.nitrogen)
        .bind(sample.phosphorus)
        .bind(sample.potassium)
        .bind(sample.ph)
        .bind(sample.moisture)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: Limit) -> AppResult<Vec<SoilReading>> {
        let rows = sqlx::query_as::<_, SoilRow>(
            r#"
            SELECT id, user_id, nitrogen, phosphorus, potassium, ph, moisture, recorded_at
            FROM soil_readings
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.get())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SoilReading::from).collect())
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SoilReading>> {
        let row = sqlx::query_as::<_, SoilRow>(
            r#"
            SELECT id, user_id, nitrogen, phosphorus, potassium, ph, moisture, recorded_at
            FROM soil_readings
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SoilReading::from))
    }
}
