//! Postgres-backed recommendation store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{CropCount, Limit, NewRecommendation, RecommendationRecord, RecommendationSummary};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::RecommendationRepository;
use crate::error::AppResult;

#[derive(Clone)]
pub struct SqlRecommendationRepository {
    db: PgPool,
}

impl SqlRecommendationRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct RecommendationRow {
    id: Uuid,
    user_id: Uuid,
    crop_id: Uuid,
    confidence_score: f64,
    recommended_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: Uuid,
    crop_name: String,
    confidence_score: f64,
    recommended_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CropCountRow {
    crop_name: String,
    count: i64,
}

#[async_trait]
impl RecommendationRepository for SqlRecommendationRepository {
    async fn insert(&self, recommendation: NewRecommendation) -> AppResult<RecommendationRecord> {
        let recommended_at = recommendation.recommended_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            INSERT INTO recommendations (user_id, crop_id, confidence_score, recommended_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, crop_id, confidence_score, recommended_at
            "#,
        )
        .bind(recommendation.user_id)
        .bind(recommendation.crop_id)
        .bind(recommendation.confidence_score)
        .bind(recommended_at)
        .fetch_one(&self.db)
        .await?;

        Ok(RecommendationRecord {
            id: row.id,
            user_id: row.user_id,
            crop_id: row.crop_id,
            confidence_score: row.confidence_score,
            recommended_at: row.recommended_at,
        })
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: Limit,
    ) -> AppResult<Vec<RecommendationSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT r.id, c.crop_name, r.confidence_score, r.recommended_at
            FROM recommendations r
            JOIN crops c ON c.id = r.crop_id
            WHERE r.user_id = $1
            ORDER BY r.recommended_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.get())
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RecommendationSummary {
                id: row.id,
                crop_name: row.crop_name,
                confidence_score: row.confidence_score,
                recommended_at: row.recommended_at,
            })
            .collect())
    }

    async fn top_crops(&self, limit: Limit) -> AppResult<Vec<CropCount>> {
        let rows = sqlx::query_as::<_, CropCountRow>(
            r#"
            SELECT c.crop_name, COUNT(r.id) AS count
            FROM recommendations r
            JOIN crops c ON c.id = r.crop_id
            GROUP BY c.crop_name
            ORDER BY count DESC, c.crop_name ASC
            LIMIT $1
            "#,
        )
        .bind(limit.get())
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CropCount {
                crop_name: row.crop_name,
                count: row.count,
            })
            .collect())
    }
}
