//! Aggregate queries behind the analytics endpoints
//!
//! Queries return grouped rows only. Picking winners, averaging and
//! rounding happen in `services::analytics`. A `since` of `None` covers the
//! user's entire history. Days are UTC calendar days.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Nutrient totals for one day with at least one log
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DailyTotalsRow {
    pub day: NaiveDate,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A label and how often it occurred
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NameCountRow {
    pub name: String,
    pub count: i64,
}

/// Occurrences per ISO weekday (1 = Monday)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WeekdayCountRow {
    pub iso_day: i32,
    pub count: i64,
}

/// Completed-session figures
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct WorkoutTotalsRow {
    pub total_workouts: i64,
    pub total_duration: i64,
    pub average_duration: Option<f64>,
    pub average_rating: Option<f64>,
    pub workouts_this_week: i64,
    pub workouts_this_month: i64,
}

/// Latest timestamps across the activity tables
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentActivityRow {
    pub last_workout: Option<DateTime<Utc>>,
    pub last_nutrition_log: Option<DateTime<Utc>>,
    pub last_progress_update: Option<NaiveDate>,
}

/// Analytics repository for aggregate queries
pub struct AnalyticsRepository;

impl AnalyticsRepository {
    /// Per-day nutrient totals, newest day first
    pub async fn daily_nutrition_totals(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<DailyTotalsRow>> {
        let rows = sqlx::query_as::<_, DailyTotalsRow>(
            r#"
            SELECT (nl.logged_at AT TIME ZONE 'UTC')::date AS day,
                   SUM(f.calories_per_100g * nl.serving_size_grams / 100)::float8 AS calories,
                   SUM(f.protein_per_100g * nl.serving_size_grams / 100)::float8 AS protein,
                   SUM(f.carbs_per_100g * nl.serving_size_grams / 100)::float8 AS carbs,
                   SUM(f.fat_per_100g * nl.serving_size_grams / 100)::float8 AS fat
            FROM nutrition_logs nl
            JOIN foods f ON f.id = nl.food_id
            WHERE nl.user_id = $1 AND ($2::timestamptz IS NULL OR nl.logged_at >= $2)
            GROUP BY day
            ORDER BY day DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Number of logs per meal type
    pub async fn meal_type_counts(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<NameCountRow>> {
        let rows = sqlx::query_as::<_, NameCountRow>(
            r#"
            SELECT meal_type AS name, COUNT(*) AS count
            FROM nutrition_logs
            WHERE user_id = $1 AND ($2::timestamptz IS NULL OR logged_at >= $2)
            GROUP BY meal_type
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Number of logs per food name
    pub async fn food_counts(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<NameCountRow>> {
        let rows = sqlx::query_as::<_, NameCountRow>(
            r#"
            SELECT f.name AS name, COUNT(*) AS count
            FROM nutrition_logs nl
            JOIN foods f ON f.id = nl.food_id
            WHERE nl.user_id = $1 AND ($2::timestamptz IS NULL OR nl.logged_at >= $2)
            GROUP BY f.name
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Totals over completed sessions plus the week and month sub-windows
    pub async fn workout_totals(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
        week_start: DateTime<Utc>,
        month_start: DateTime<Utc>,
    ) -> Result<WorkoutTotalsRow> {
        let row = sqlx::query_as::<_, WorkoutTotalsRow>(
            r#"
            SELECT COUNT(*) FILTER (WHERE $2::timestamptz IS NULL OR started_at >= $2) AS total_workouts,
                   COALESCE(SUM(duration_minutes) FILTER (WHERE $2::timestamptz IS NULL OR started_at >= $2), 0)::int8
                       AS total_duration,
                   (AVG(duration_minutes) FILTER (WHERE $2::timestamptz IS NULL OR started_at >= $2))::float8
                       AS average_duration,
                   (AVG(rating) FILTER (WHERE $2::timestamptz IS NULL OR started_at >= $2))::float8
                       AS average_rating,
                   COUNT(*) FILTER (WHERE started_at >= $3) AS workouts_this_week,
                   COUNT(*) FILTER (WHERE started_at >= $4) AS workouts_this_month
            FROM workout_sessions
            WHERE user_id = $1 AND completed_at IS NOT NULL
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(week_start)
        .bind(month_start)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Completed sessions per ISO weekday
    pub async fn weekday_counts(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<WeekdayCountRow>> {
        let rows = sqlx::query_as::<_, WeekdayCountRow>(
            r#"
            SELECT EXTRACT(ISODOW FROM started_at AT TIME ZONE 'UTC')::int4 AS iso_day,
                   COUNT(*) AS count
            FROM workout_sessions
            WHERE user_id = $1 AND completed_at IS NOT NULL
              AND ($2::timestamptz IS NULL OR started_at >= $2)
            GROUP BY iso_day
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Performed-exercise occurrences per exercise name in completed sessions
    pub async fn exercise_counts(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<NameCountRow>> {
        let rows = sqlx::query_as::<_, NameCountRow>(
            r#"
            SELECT e.name AS name, COUNT(*) AS count
            FROM session_exercises se
            JOIN exercises e ON e.id = se.exercise_id
            JOIN workout_sessions ws ON ws.id = se.session_id
            WHERE ws.user_id = $1 AND ws.completed_at IS NOT NULL
              AND ($2::timestamptz IS NULL OR ws.started_at >= $2)
            GROUP BY e.name
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Most recent measurement of a type, optionally on or before a date
    pub async fn latest_measurement(
        pool: &PgPool,
        user_id: Uuid,
        measurement_type: &str,
        on_or_before: Option<NaiveDate>,
    ) -> Result<Option<f64>> {
        let row: Option<(f64,)> = sqlx::query_as(
            r#"
            SELECT value::float8
            FROM progress_measurements
            WHERE user_id = $1 AND measurement_type = $2
              AND ($3::date IS NULL OR date_measured <= $3)
            ORDER BY date_measured DESC, created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(measurement_type)
        .bind(on_or_before)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Distinct measurement types, alphabetical
    pub async fn measurement_types(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT measurement_type
            FROM progress_measurements
            WHERE user_id = $1
            ORDER BY measurement_type
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    /// Latest workout, nutrition log and measurement date
    pub async fn recent_activity(pool: &PgPool, user_id: Uuid) -> Result<RecentActivityRow> {
        let row = sqlx::query_as::<_, RecentActivityRow>(
            r#"
            SELECT (SELECT MAX(started_at) FROM workout_sessions WHERE user_id = $1) AS last_workout,
                   (SELECT MAX(logged_at) FROM nutrition_logs WHERE user_id = $1) AS last_nutrition_log,
                   (SELECT MAX(date_measured) FROM progress_measurements WHERE user_id = $1)
                       AS last_progress_update
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }
}
