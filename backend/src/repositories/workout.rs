//! Workout template and session repository
//!
//! Insert functions take a `&mut PgConnection` so the service can run a
//! parent row and its children inside one transaction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

/// Workout template record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty_level: String,
    pub estimated_duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Template exercise joined with its catalog entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateExerciseRecord {
    pub id: i64,
    pub exercise_id: i64,
    pub sets: i32,
    pub reps: Option<i32>,
    pub weight_kg: Option<Decimal>,
    pub duration_seconds: Option<i32>,
    pub rest_seconds: Option<i32>,
    pub order_index: i32,
    pub exercise_name: String,
    pub exercise_description: Option<String>,
    pub exercise_category: String,
    pub exercise_muscle_groups: Vec<String>,
    pub exercise_equipment: Option<String>,
    pub exercise_instructions: Option<String>,
    pub exercise_created_at: DateTime<Utc>,
}

/// Workout session record with the name of its template
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub template_id: Option<i64>,
    pub template_name: Option<String>,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Performed exercise joined with the exercise name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionExerciseRecord {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub sets_completed: i32,
    pub reps_completed: Option<i32>,
    pub weight_kg: Option<Decimal>,
    pub duration_seconds: Option<i32>,
    pub notes: Option<String>,
}

/// Input for creating a template row
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty_level: String,
    pub estimated_duration_minutes: Option<i32>,
}

/// Input for one prescribed exercise
#[derive(Debug, Clone)]
pub struct NewTemplateExercise {
    pub exercise_id: i64,
    pub sets: i32,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<i32>,
    pub rest_seconds: Option<i32>,
    pub order_index: i32,
}

/// Input for creating a session row
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: Uuid,
    pub template_id: Option<i64>,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

/// Input for one performed exercise
#[derive(Debug, Clone)]
pub struct NewSessionExercise {
    pub exercise_id: i64,
    pub sets_completed: i32,
    pub reps_completed: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<i32>,
    pub notes: Option<String>,
}

const TEMPLATE_COLUMNS: &str = "id, user_id, name, description, category, difficulty_level, \
                                estimated_duration_minutes, created_at";

const SESSION_SELECT: &str = r#"
    SELECT s.id, s.user_id, s.template_id, t.name AS template_name, s.name,
           s.started_at, s.completed_at, s.duration_minutes, s.rating, s.notes, s.created_at
    FROM workout_sessions s
    LEFT JOIN workout_templates t ON t.id = s.template_id
"#;

/// Workout repository for database operations
pub struct WorkoutRepository;

impl WorkoutRepository {
    /// Insert a template row
    pub async fn insert_template(conn: &mut PgConnection, input: &NewTemplate) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO workout_templates
                (user_id, name, description, category, difficulty_level, estimated_duration_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.difficulty_level)
        .bind(input.estimated_duration_minutes)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Insert one prescribed exercise of a template
    pub async fn insert_template_exercise(
        conn: &mut PgConnection,
        template_id: i64,
        input: &NewTemplateExercise,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO template_exercises
                (template_id, exercise_id, sets, reps, weight_kg, duration_seconds, rest_seconds, order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(template_id)
        .bind(input.exercise_id)
        .bind(input.sets)
        .bind(input.reps)
        .bind(input.weight_kg)
        .bind(input.duration_seconds)
        .bind(input.rest_seconds)
        .bind(input.order_index)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// List a user's templates, newest first
    pub async fn list_templates(pool: &PgPool, user_id: Uuid) -> Result<Vec<TemplateRecord>> {
        let records = sqlx::query_as::<_, TemplateRecord>(&format!(
            r#"
            SELECT {TEMPLATE_COLUMNS}
            FROM workout_templates
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get a template owned by the user
    pub async fn get_template<'e, E>(
        executor: E,
        id: i64,
        user_id: Uuid,
    ) -> Result<Option<TemplateRecord>>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, TemplateRecord>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM workout_templates WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(record)
    }

    /// Exercises of a template in prescribed order
    pub async fn list_template_exercises(
        pool: &PgPool,
        template_id: i64,
    ) -> Result<Vec<TemplateExerciseRecord>> {
        let records = sqlx::query_as::<_, TemplateExerciseRecord>(
            r#"
            SELECT te.id, te.exercise_id, te.sets, te.reps, te.weight_kg, te.duration_seconds,
                   te.rest_seconds, te.order_index,
                   e.name AS exercise_name, e.description AS exercise_description,
                   e.category AS exercise_category, e.muscle_groups AS exercise_muscle_groups,
                   e.equipment AS exercise_equipment, e.instructions AS exercise_instructions,
                   e.created_at AS exercise_created_at
            FROM template_exercises te
            JOIN exercises e ON e.id = te.exercise_id
            WHERE te.template_id = $1
            ORDER BY te.order_index
            "#,
        )
        .bind(template_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Insert a session row
    pub async fn insert_session(conn: &mut PgConnection, input: &NewSession) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO workout_sessions
                (user_id, template_id, name, started_at, completed_at, duration_minutes, rating, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(input.template_id)
        .bind(&input.name)
        .bind(input.started_at)
        .bind(input.completed_at)
        .bind(input.duration_minutes)
        .bind(input.rating)
        .bind(&input.notes)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Insert one performed exercise of a session
    pub async fn insert_session_exercise(
        conn: &mut PgConnection,
        session_id: i64,
        input: &NewSessionExercise,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_exercises
                (session_id, exercise_id, sets_completed, reps_completed, weight_kg, duration_seconds, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session_id)
        .bind(input.exercise_id)
        .bind(input.sets_completed)
        .bind(input.reps_completed)
        .bind(input.weight_kg)
        .bind(input.duration_seconds)
        .bind(&input.notes)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Most recent sessions of a user
    pub async fn list_sessions(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<SessionRecord>> {
        let records = sqlx::query_as::<_, SessionRecord>(&format!(
            r#"
            {SESSION_SELECT}
            WHERE s.user_id = $1
            ORDER BY s.started_at DESC, s.id DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get a session owned by the user
    pub async fn get_session(
        pool: &PgPool,
        id: i64,
        user_id: Uuid,
    ) -> Result<Option<SessionRecord>> {
        let record = sqlx::query_as::<_, SessionRecord>(&format!(
            "{SESSION_SELECT} WHERE s.id = $1 AND s.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Performed exercises for a batch of sessions
    pub async fn list_session_exercises(
        pool: &PgPool,
        session_ids: &[i64],
    ) -> Result<Vec<SessionExerciseRecord>> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, SessionExerciseRecord>(
            r#"
            SELECT se.id, se.session_id, se.exercise_id, e.name AS exercise_name,
                   se.sets_completed, se.reps_completed, se.weight_kg, se.duration_seconds, se.notes
            FROM session_exercises se
            JOIN exercises e ON e.id = se.exercise_id
            WHERE se.session_id = ANY($1)
            ORDER BY se.session_id, se.id
            "#,
        )
        .bind(session_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
