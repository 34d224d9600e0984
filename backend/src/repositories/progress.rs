//! Progress measurement repository

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Progress measurement record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub date_measured: NaiveDate,
    pub measurement_type: String,
    pub value: Decimal,
    pub unit: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a measurement
#[derive(Debug, Clone)]
pub struct CreateProgress {
    pub user_id: Uuid,
    pub date_measured: NaiveDate,
    pub measurement_type: String,
    pub value: f64,
    pub unit: String,
    pub notes: Option<String>,
}

/// Progress repository for database operations
pub struct ProgressRepository;

impl ProgressRepository {
    /// Create a new measurement
    pub async fn create(pool: &PgPool, input: CreateProgress) -> Result<ProgressRecord> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            INSERT INTO progress_measurements (user_id, date_measured, measurement_type, value, unit, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, date_measured, measurement_type, value, unit, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.date_measured)
        .bind(&input.measurement_type)
        .bind(input.value)
        .bind(&input.unit)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List measurements, most recent date first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        measurement_type: Option<&str>,
    ) -> Result<Vec<ProgressRecord>> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT id, user_id, date_measured, measurement_type, value, unit, notes, created_at
            FROM progress_measurements
            WHERE user_id = $1 AND ($2::text IS NULL OR measurement_type = $2)
            ORDER BY date_measured DESC, created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(measurement_type)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
