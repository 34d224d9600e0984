//! Workout template and session service
//!
//! Templates and sessions are written as a parent row plus child rows in
//! one transaction. Any failure rolls the whole write back and returns the
//! original error.

use crate::error::ApiError;
use crate::repositories::workout::{
    SessionExerciseRecord, SessionRecord, TemplateExerciseRecord, TemplateRecord,
};
use crate::repositories::{
    ExerciseRepository, NewSession, NewSessionExercise, NewTemplate, NewTemplateExercise,
    WorkoutRepository,
};
use crate::services::decimal_to_f64;
use chrono::{DateTime, Utc};
use fittrack_shared::types::{
    CreateTemplateRequest, ExerciseResponse, LogSessionRequest, SessionExerciseResponse,
    TemplateExerciseResponse, WorkoutSessionResponse, WorkoutTemplateDetailResponse,
    WorkoutTemplateResponse,
};
use fittrack_shared::validation::{validate_not_blank, validate_session_times};
use fittrack_shared::DifficultyLevel;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Sessions returned by the list endpoint
const SESSION_LIST_LIMIT: i64 = 50;

/// Workout service for templates and logged sessions
pub struct WorkoutService;

impl WorkoutService {
    /// Create a template with its prescribed exercises
    pub async fn create_template(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateTemplateRequest,
    ) -> Result<WorkoutTemplateDetailResponse, ApiError> {
        req.validate()?;
        validate_not_blank("name", &req.name).map_err(ApiError::InvalidArgument)?;
        let difficulty = req.difficulty_level.parse::<DifficultyLevel>()?;

        let template = NewTemplate {
            user_id,
            name: req.name.trim().to_string(),
            description: req.description,
            category: req.category,
            difficulty_level: difficulty.to_string(),
            estimated_duration_minutes: req.estimated_duration_minutes,
        };
        let exercises: Vec<NewTemplateExercise> = req
            .exercises
            .iter()
            .enumerate()
            .map(|(position, e)| NewTemplateExercise {
                exercise_id: e.exercise_id,
                sets: e.sets,
                reps: e.reps,
                weight_kg: e.weight_kg,
                duration_seconds: e.duration_seconds,
                rest_seconds: e.rest_seconds,
                order_index: position as i32 + 1,
            })
            .collect();

        let mut tx = pool.begin().await?;
        let template_id = match Self::insert_template_rows(&mut *tx, &template, &exercises).await {
            Ok(id) => id,
            Err(err) => {
                rollback(tx, "template", &err).await;
                return Err(err);
            }
        };
        tx.commit().await?;

        info!(template_id, exercises = exercises.len(), "Workout template created");
        Self::get_template(pool, user_id, template_id).await
    }

    async fn insert_template_rows(
        conn: &mut PgConnection,
        template: &NewTemplate,
        exercises: &[NewTemplateExercise],
    ) -> Result<i64, ApiError> {
        let template_id = WorkoutRepository::insert_template(&mut *conn, template)
            .await
            .map_err(ApiError::Internal)?;

        for exercise in exercises {
            ensure_exercise_exists(&mut *conn, exercise.exercise_id).await?;
            WorkoutRepository::insert_template_exercise(&mut *conn, template_id, exercise)
                .await
                .map_err(ApiError::Internal)?;
        }

        Ok(template_id)
    }

    /// List the caller's templates, newest first
    pub async fn list_templates(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<WorkoutTemplateResponse>, ApiError> {
        let records = WorkoutRepository::list_templates(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(template_response).collect())
    }

    /// Get one of the caller's templates with its exercises in order
    pub async fn get_template(
        pool: &PgPool,
        user_id: Uuid,
        template_id: i64,
    ) -> Result<WorkoutTemplateDetailResponse, ApiError> {
        let template = WorkoutRepository::get_template(pool, template_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("workout template {} not found", template_id)))?;

        let exercises = WorkoutRepository::list_template_exercises(pool, template_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(WorkoutTemplateDetailResponse {
            template: template_response(template),
            exercises: exercises.into_iter().map(template_exercise_response).collect(),
        })
    }

    /// Log a performed session with its exercises
    pub async fn log_session(
        pool: &PgPool,
        user_id: Uuid,
        req: LogSessionRequest,
    ) -> Result<WorkoutSessionResponse, ApiError> {
        req.validate()?;
        validate_not_blank("name", &req.name).map_err(ApiError::InvalidArgument)?;
        let started_at = req.started_at.unwrap_or_else(Utc::now);
        validate_session_times(started_at, req.completed_at).map_err(ApiError::InvalidArgument)?;

        if let Some(template_id) = req.template_id {
            WorkoutRepository::get_template(pool, template_id, user_id)
                .await
                .map_err(ApiError::Internal)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("workout template {} not found", template_id))
                })?;
        }

        let session = NewSession {
            user_id,
            template_id: req.template_id,
            name: req.name.trim().to_string(),
            started_at,
            completed_at: req.completed_at,
            duration_minutes: req
                .duration_minutes
                .or_else(|| derive_duration_minutes(started_at, req.completed_at)),
            rating: req.rating,
            notes: req.notes,
        };
        let exercises: Vec<NewSessionExercise> = req
            .exercises
            .into_iter()
            .map(|e| NewSessionExercise {
                exercise_id: e.exercise_id,
                sets_completed: e.sets_completed,
                reps_completed: e.reps_completed,
                weight_kg: e.weight_kg,
                duration_seconds: e.duration_seconds,
                notes: e.notes,
            })
            .collect();

        let mut tx = pool.begin().await?;
        let session_id = match Self::insert_session_rows(&mut *tx, &session, &exercises).await {
            Ok(id) => id,
            Err(err) => {
                rollback(tx, "session", &err).await;
                return Err(err);
            }
        };
        tx.commit().await?;

        info!(session_id, exercises = exercises.len(), "Workout session logged");
        Self::get_session(pool, user_id, session_id).await
    }

    async fn insert_session_rows(
        conn: &mut PgConnection,
        session: &NewSession,
        exercises: &[NewSessionExercise],
    ) -> Result<i64, ApiError> {
        let session_id = WorkoutRepository::insert_session(&mut *conn, session)
            .await
            .map_err(ApiError::Internal)?;

        for exercise in exercises {
            ensure_exercise_exists(&mut *conn, exercise.exercise_id).await?;
            WorkoutRepository::insert_session_exercise(&mut *conn, session_id, exercise)
                .await
                .map_err(ApiError::Internal)?;
        }

        Ok(session_id)
    }

    /// List the caller's most recent sessions with their exercises
    pub async fn list_sessions(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<WorkoutSessionResponse>, ApiError> {
        let sessions = WorkoutRepository::list_sessions(pool, user_id, SESSION_LIST_LIMIT)
            .await
            .map_err(ApiError::Internal)?;

        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        let exercises = WorkoutRepository::list_session_exercises(pool, &ids)
            .await
            .map_err(ApiError::Internal)?;

        Ok(attach_exercises(sessions, exercises))
    }

    /// Get one of the caller's sessions
    pub async fn get_session(
        pool: &PgPool,
        user_id: Uuid,
        session_id: i64,
    ) -> Result<WorkoutSessionResponse, ApiError> {
        let session = WorkoutRepository::get_session(pool, session_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("workout session {} not found", session_id)))?;

        let exercises = WorkoutRepository::list_session_exercises(pool, &[session.id])
            .await
            .map_err(ApiError::Internal)?;

        attach_exercises(vec![session], exercises)
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("workout session {} not found", session_id)))
    }
}

async fn ensure_exercise_exists(conn: &mut PgConnection, exercise_id: i64) -> Result<(), ApiError> {
    ExerciseRepository::get_by_id(&mut *conn, exercise_id)
        .await
        .map_err(ApiError::Internal)?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(format!("exercise {} not found", exercise_id)))
}

async fn rollback(tx: Transaction<'_, Postgres>, what: &str, err: &ApiError) {
    warn!(error = %err, "Rolling back {} write", what);
    if let Err(e) = tx.rollback().await {
        warn!(error = %e, "Rollback failed");
    }
}

/// Whole minutes between start and completion, when both are known
fn derive_duration_minutes(
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> Option<i32> {
    let completed_at = completed_at?;
    let seconds = (completed_at - started_at).num_seconds();
    if seconds < 0 {
        return None;
    }
    i32::try_from((seconds + 30) / 60).ok()
}

fn attach_exercises(
    sessions: Vec<SessionRecord>,
    exercises: Vec<SessionExerciseRecord>,
) -> Vec<WorkoutSessionResponse> {
    let mut by_session: HashMap<i64, Vec<SessionExerciseResponse>> = HashMap::new();
    for e in exercises {
        by_session
            .entry(e.session_id)
            .or_default()
            .push(session_exercise_response(e));
    }

    sessions
        .into_iter()
        .map(|s| WorkoutSessionResponse {
            exercises: by_session.remove(&s.id).unwrap_or_default(),
            id: s.id,
            user_id: s.user_id,
            template_id: s.template_id,
            template_name: s.template_name,
            name: s.name,
            started_at: s.started_at,
            completed_at: s.completed_at,
            duration_minutes: s.duration_minutes,
            rating: s.rating,
            notes: s.notes,
            created_at: s.created_at,
        })
        .collect()
}

fn template_response(record: TemplateRecord) -> WorkoutTemplateResponse {
    WorkoutTemplateResponse {
        id: record.id,
        user_id: record.user_id,
        name: record.name,
        description: record.description,
        category: record.category,
        difficulty_level: record.difficulty_level,
        estimated_duration_minutes: record.estimated_duration_minutes,
        created_at: record.created_at,
    }
}

fn template_exercise_response(record: TemplateExerciseRecord) -> TemplateExerciseResponse {
    TemplateExerciseResponse {
        id: record.id,
        exercise_id: record.exercise_id,
        sets: record.sets,
        reps: record.reps,
        weight_kg: record.weight_kg.as_ref().map(decimal_to_f64),
        duration_seconds: record.duration_seconds,
        rest_seconds: record.rest_seconds,
        order_index: record.order_index,
        exercise: ExerciseResponse {
            id: record.exercise_id,
            name: record.exercise_name,
            description: record.exercise_description,
            category: record.exercise_category,
            muscle_groups: record.exercise_muscle_groups,
            equipment: record.exercise_equipment,
            instructions: record.exercise_instructions,
            created_at: record.exercise_created_at,
        },
    }
}

fn session_exercise_response(record: SessionExerciseRecord) -> SessionExerciseResponse {
    SessionExerciseResponse {
        id: record.id,
        exercise_id: record.exercise_id,
        exercise_name: record.exercise_name,
        sets_completed: record.sets_completed,
        reps_completed: record.reps_completed,
        weight_kg: record.weight_kg.as_ref().map(decimal_to_f64),
        duration_seconds: record.duration_seconds,
        notes: record.notes,
    }
}
