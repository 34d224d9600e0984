//! Exercise catalog service

use crate::error::ApiError;
use crate::repositories::{ExerciseRecord, ExerciseRepository};
use fittrack_shared::types::ExerciseResponse;
use sqlx::PgPool;

/// Read-only access to the exercise catalog
pub struct ExerciseService;

impl ExerciseService {
    /// List exercises ordered by category and name
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let records = ExerciseRepository::list(pool, category)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(exercise_response).collect())
    }

    /// Get one exercise
    pub async fn get(pool: &PgPool, id: i64) -> Result<ExerciseResponse, ApiError> {
        ExerciseRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(exercise_response)
            .ok_or_else(|| ApiError::NotFound(format!("exercise {} not found", id)))
    }
}

pub(crate) fn exercise_response(record: ExerciseRecord) -> ExerciseResponse {
    ExerciseResponse {
        id: record.id,
        name: record.name,
        description: record.description,
        category: record.category,
        muscle_groups: record.muscle_groups,
        equipment: record.equipment,
        instructions: record.instructions,
        created_at: record.created_at,
    }
}
