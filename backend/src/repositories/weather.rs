//! Postgres-backed weather readings

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Limit, WeatherReading};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::WeatherReadingRepository;
use crate::error::AppResult;
use crate::external::WeatherObservation;

#[derive(Clone)]
pub struct SqlWeatherReadingRepository {
    db: PgPool,
}

impl SqlWeatherReadingRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct WeatherRow {
    id: Uuid,
    location: String,
    temperature: f64,
    humidity: f64,
    rainfall: f64,
    recorded_at: DateTime<Utc>,
}

impl From<WeatherRow> for WeatherReading {
    fn from(row: WeatherRow) -> Self {
        WeatherReading {
            id: row.id,
            location: row.location,
            temperature: row.temperature,
            humidity: row.humidity,
            rainfall: row.rainfall,
            recorded_at: row.recorded_at,
        }
    }
}

#[async_trait]
impl WeatherReadingRepository for SqlWeatherReadingRepository {
    async fn latest_for_location(
        &self,
        location: &str,
        recorded_after: Option<DateTime<Utc>>,
    ) -> AppResult<Option<WeatherReading>> {
        let row = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT id, location, temperature, humidity, rainfall, recorded_at
            FROM weather_readings
            WHERE location = $1
              AND ($2::timestamptz IS NULL OR recorded_at >= $2)
            ORDER BY recorded_at DESC
            LIMIT 1
            "#,
        )
        .bind(location)
        .bind(recorded_after)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(WeatherReading::from))
    }

    async fn insert(
        &self,
        location: &str,
        observation: &WeatherObservation,
    ) -> AppResult<WeatherReading> {
        let row = sqlx::query_as::<_, WeatherRow>(
            r#"
            INSERT INTO weather_readings (location, temperature, humidity, rainfall)
            VALUES ($1, $2, $3, $4)
            RETURNING id, location, temperature, humidity, rainfall, recorded_at
            "#,
        )
        .bind(location)
        .bind(observation.temperature)
        .bind(observation.humidity)
        .bind(observation.rainfall)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn list_recent(
        &self,
        location: Option<&str>,
        limit: Limit,
    ) -> AppResult<Vec<WeatherReading>> {
        let rows = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT id, location, temperature, humidity, rainfall, recorded_at
            FROM weather_readings
            WHERE ($1::varchar IS NULL OR location = $1)
            ORDER BY recorded_at DESC
            LIMIT $2
            "#,
        )
        .bind(location)
        .bind(limit.get())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WeatherReading::from).collect())
    }
}
