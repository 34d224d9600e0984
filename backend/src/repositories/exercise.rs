//! Exercise catalog repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

/// Exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub muscle_groups: Vec<String>,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Exercise repository for database operations
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// List the catalog, optionally restricted to one category
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, name, description, category, muscle_groups, equipment, instructions, created_at
            FROM exercises
            WHERE ($1::text IS NULL OR LOWER(category) = LOWER($1))
            ORDER BY category, name, id
            "#,
        )
        .bind(category)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get exercise by ID
    ///
    /// Accepts a pool or a transaction connection.
    pub async fn get_by_id<'e, E>(executor: E, id: i64) -> Result<Option<ExerciseRecord>>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, name, description, category, muscle_groups, equipment, instructions, created_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(record)
    }
}
