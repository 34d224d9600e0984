//! Food search and nutrition logging service

use crate::error::ApiError;
use crate::repositories::food::{DailyLogRecord, NutritionLogRecord};
use crate::repositories::{CreateNutritionLog, FoodRecord, FoodRepository, NutritionLogRepository};
use crate::services::decimal_to_f64;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use fittrack_shared::types::{
    DailyLogEntry, DailyLogsResponse, FoodResponse, LogFoodRequest, NutritionLogResponse,
};
use fittrack_shared::validation::validate_serving_grams;
use fittrack_shared::{round_calories, round_to_tenth, MealType};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum foods returned by a search
const SEARCH_LIMIT: i64 = 20;

/// Nutrition service for foods and consumption logs
pub struct NutritionService;

impl NutritionService {
    /// Search foods by name or brand
    pub async fn search_foods(pool: &PgPool, query: &str) -> Result<Vec<FoodResponse>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidArgument("search query is required".to_string()));
        }

        let records = FoodRepository::search(pool, query, SEARCH_LIMIT)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(food_response).collect())
    }

    /// Get one food
    pub async fn get_food(pool: &PgPool, id: i64) -> Result<FoodResponse, ApiError> {
        FoodRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(food_response)
            .ok_or_else(|| ApiError::NotFound(format!("food {} not found", id)))
    }

    /// Log a serving of a food
    pub async fn log_food(
        pool: &PgPool,
        user_id: Uuid,
        req: LogFoodRequest,
    ) -> Result<NutritionLogResponse, ApiError> {
        let meal_type = req.meal_type.parse::<MealType>()?;
        validate_serving_grams(req.serving_size_grams).map_err(ApiError::InvalidArgument)?;

        FoodRepository::get_by_id(pool, req.food_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("food {} not found", req.food_id)))?;

        let record = NutritionLogRepository::create(
            pool,
            CreateNutritionLog {
                user_id,
                food_id: req.food_id,
                serving_size_grams: req.serving_size_grams,
                meal_type: meal_type.to_string(),
                logged_at: req.logged_at.unwrap_or_else(Utc::now),
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(log_response(record))
    }

    /// The caller's logs for one UTC day with rounded totals
    pub async fn daily_logs(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailyLogsResponse, ApiError> {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);

        let records = NutritionLogRepository::get_by_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(summarize_day(date, records))
    }
}

/// Parse a `YYYY-MM-DD` path segment
pub fn parse_log_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidArgument(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

fn summarize_day(date: NaiveDate, records: Vec<DailyLogRecord>) -> DailyLogsResponse {
    let mut totals = [0.0f64; 7];
    let logs: Vec<DailyLogEntry> = records
        .into_iter()
        .map(|r| {
            for (total, value) in totals
                .iter_mut()
                .zip([r.calories, r.protein, r.carbs, r.fat, r.fiber, r.sugar, r.sodium])
            {
                *total += value;
            }
            DailyLogEntry {
                id: r.id,
                food_id: r.food_id,
                food_name: r.food_name,
                brand: r.brand,
                serving_size_grams: decimal_to_f64(&r.serving_size_grams),
                meal_type: r.meal_type,
                calories: r.calories,
                protein: r.protein,
                carbs: r.carbs,
                fat: r.fat,
                fiber: r.fiber,
                sugar: r.sugar,
                sodium: r.sodium,
                logged_at: r.logged_at,
                notes: r.notes,
            }
        })
        .collect();

    let [calories, protein, carbs, fat, fiber, sugar, sodium] = totals;
    DailyLogsResponse {
        date,
        logs,
        total_calories: round_calories(calories),
        total_protein: round_to_tenth(protein),
        total_carbs: round_to_tenth(carbs),
        total_fat: round_to_tenth(fat),
        total_fiber: round_to_tenth(fiber),
        total_sugar: round_to_tenth(sugar),
        total_sodium: round_to_tenth(sodium),
    }
}

fn food_response(record: FoodRecord) -> FoodResponse {
    FoodResponse {
        id: record.id,
        name: record.name,
        brand: record.brand,
        serving_size: record.serving_size,
        calories_per_100g: decimal_to_f64(&record.calories_per_100g),
        protein_per_100g: decimal_to_f64(&record.protein_per_100g),
        carbs_per_100g: decimal_to_f64(&record.carbs_per_100g),
        fat_per_100g: decimal_to_f64(&record.fat_per_100g),
        fiber_per_100g: decimal_to_f64(&record.fiber_per_100g),
        sugar_per_100g: decimal_to_f64(&record.sugar_per_100g),
        sodium_per_100g: decimal_to_f64(&record.sodium_per_100g),
        created_at: record.created_at,
    }
}

fn log_response(record: NutritionLogRecord) -> NutritionLogResponse {
    NutritionLogResponse {
        id: record.id,
        user_id: record.user_id,
        food_id: record.food_id,
        serving_size_grams: decimal_to_f64(&record.serving_size_grams),
        meal_type: record.meal_type,
        logged_at: record.logged_at,
        notes: record.notes,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn entry(id: i64, calories: f64, protein: f64) -> DailyLogRecord {
        DailyLogRecord {
            id,
            food_id: 1,
            food_name: "Oatmeal".to_string(),
            brand: None,
            serving_size_grams: Decimal::from(100),
            meal_type: "breakfast".to_string(),
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 0.0,
            logged_at: Utc::now(),
            notes: None,
        }
    }

    #[test]
    fn test_summarize_day_rounds_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let summary = summarize_day(date, vec![entry(1, 100.4, 2.54), entry(2, 100.3, 2.5)]);

        assert_eq!(summary.logs.len(), 2);
        assert_eq!(summary.total_calories, 201);
        assert!((summary.total_protein - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let summary = summarize_day(date, vec![]);
        assert!(summary.logs.is_empty());
        assert_eq!(summary.total_calories, 0);
        assert_eq!(summary.total_sodium, 0.0);
    }

    #[test]
    fn test_parse_log_date() {
        assert_eq!(
            parse_log_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_log_date("2023-02-29").is_err());
        assert!(parse_log_date("yesterday").is_err());
    }
}
