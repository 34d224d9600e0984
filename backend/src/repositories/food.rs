//! Food reference data and nutrition log repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Food record from database (values per 100g)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodRecord {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub serving_size: Option<String>,
    pub calories_per_100g: Decimal,
    pub protein_per_100g: Decimal,
    pub carbs_per_100g: Decimal,
    pub fat_per_100g: Decimal,
    pub fiber_per_100g: Decimal,
    pub sugar_per_100g: Decimal,
    pub sodium_per_100g: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Nutrition log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NutritionLogRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub food_id: i64,
    pub serving_size_grams: Decimal,
    pub meal_type: String,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Log joined with its food, nutrients scaled to the serving
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyLogRecord {
    pub id: i64,
    pub food_id: i64,
    pub food_name: String,
    pub brand: Option<String>,
    pub serving_size_grams: Decimal,
    pub meal_type: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Input for creating a nutrition log
#[derive(Debug, Clone)]
pub struct CreateNutritionLog {
    pub user_id: Uuid,
    pub food_id: i64,
    pub serving_size_grams: f64,
    pub meal_type: String,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

const FOOD_COLUMNS: &str = "id, name, brand, serving_size, calories_per_100g, protein_per_100g, \
                            carbs_per_100g, fat_per_100g, fiber_per_100g, sugar_per_100g, \
                            sodium_per_100g, created_at";

/// Food repository for database operations
pub struct FoodRepository;

impl FoodRepository {
    /// Search foods by name or brand
    pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<FoodRecord>> {
        let pattern = format!("%{}%", escape_like(query));
        let records = sqlx::query_as::<_, FoodRecord>(&format!(
            r#"
            SELECT {FOOD_COLUMNS}
            FROM foods
            WHERE name ILIKE $1 OR brand ILIKE $1
            ORDER BY name, id
            LIMIT $2
            "#
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get food by ID
    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<FoodRecord>> {
        let record = sqlx::query_as::<_, FoodRecord>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

/// Nutrition log repository for database operations
pub struct NutritionLogRepository;

impl NutritionLogRepository {
    /// Create a new nutrition log
    pub async fn create(pool: &PgPool, input: CreateNutritionLog) -> Result<NutritionLogRecord> {
        let record = sqlx::query_as::<_, NutritionLogRecord>(
            r#"
            INSERT INTO nutrition_logs (user_id, food_id, serving_size_grams, meal_type, logged_at, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, food_id, serving_size_grams, meal_type, logged_at, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.food_id)
        .bind(input.serving_size_grams)
        .bind(&input.meal_type)
        .bind(input.logged_at)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Logs in `[start, end)` with scaled nutrients, newest first
    pub async fn get_by_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyLogRecord>> {
        let records = sqlx::query_as::<_, DailyLogRecord>(
            r#"
            SELECT nl.id, nl.food_id, f.name AS food_name, f.brand, nl.serving_size_grams, nl.meal_type,
                   (f.calories_per_100g * nl.serving_size_grams / 100)::float8 AS calories,
                   (f.protein_per_100g * nl.serving_size_grams / 100)::float8 AS protein,
                   (f.carbs_per_100g * nl.serving_size_grams / 100)::float8 AS carbs,
                   (f.fat_per_100g * nl.serving_size_grams / 100)::float8 AS fat,
                   (f.fiber_per_100g * nl.serving_size_grams / 100)::float8 AS fiber,
                   (f.sugar_per_100g * nl.serving_size_grams / 100)::float8 AS sugar,
                   (f.sodium_per_100g * nl.serving_size_grams / 100)::float8 AS sodium,
                   nl.logged_at, nl.notes
            FROM nutrition_logs nl
            JOIN foods f ON f.id = nl.food_id
            WHERE nl.user_id = $1 AND nl.logged_at >= $2 AND nl.logged_at < $3
            ORDER BY nl.logged_at DESC, nl.id DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
