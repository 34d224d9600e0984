//! API request and response types
//!
//! All payloads use camelCase field names on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Auth Types
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity of an authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Signup and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountInfo,
}

// ============================================================================
// User Profile Types
// ============================================================================

/// Create profile request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 150, message = "age must be between 1 and 150"))]
    pub age: Option<i32>,
    #[validate(range(min = 20.0, max = 500.0, message = "weight must be between 20 and 500 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 50.0, max = 300.0, message = "height must be between 50 and 300 cm"))]
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    #[validate(length(max = 500, message = "fitness goal must be at most 500 characters"))]
    pub fitness_goal: Option<String>,
}

/// Update profile request (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 150, message = "age must be between 1 and 150"))]
    pub age: Option<i32>,
    #[validate(range(min = 20.0, max = 500.0, message = "weight must be between 20 and 500 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 50.0, max = 300.0, message = "height must be between 50 and 300 cm"))]
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    #[validate(length(max = 500, message = "fitness goal must be at most 500 characters"))]
    pub fitness_goal: Option<String>,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    pub activity_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Present when both weight and height are known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Exercise Catalog Types
// ============================================================================

/// Exercise list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseListQuery {
    pub category: Option<String>,
}

/// Exercise catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub muscle_groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Exercise list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExercisesResponse {
    pub exercises: Vec<ExerciseResponse>,
}

// ============================================================================
// Workout Template Types
// ============================================================================

/// Prescribed exercise inside a new template
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExerciseInput {
    pub exercise_id: i64,
    #[validate(range(min = 1, max = 100, message = "sets must be between 1 and 100"))]
    pub sets: i32,
    #[validate(range(min = 0, max = 1000, message = "reps must be between 0 and 1000"))]
    pub reps: Option<i32>,
    #[validate(range(min = 0.0, max = 1000.0, message = "weight must be between 0 and 1000 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0, max = 86400, message = "duration must be between 0 and 86400 seconds"))]
    pub duration_seconds: Option<i32>,
    #[validate(range(min = 0, max = 3600, message = "rest must be between 0 and 3600 seconds"))]
    pub rest_seconds: Option<i32>,
}

/// Create template request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty_level: String,
    #[validate(range(min = 1, max = 1440, message = "estimated duration must be 1-1440 minutes"))]
    pub estimated_duration_minutes: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<TemplateExerciseInput>,
}

/// Workout template summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplateResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub difficulty_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Prescribed exercise on a stored template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExerciseResponse {
    pub id: i64,
    pub exercise_id: i64,
    pub sets: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<i32>,
    pub order_index: i32,
    pub exercise: ExerciseResponse,
}

/// Template with its exercises in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplateDetailResponse {
    #[serde(flatten)]
    pub template: WorkoutTemplateResponse,
    pub exercises: Vec<TemplateExerciseResponse>,
}

/// Template list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTemplatesResponse {
    pub templates: Vec<WorkoutTemplateResponse>,
}

// ============================================================================
// Workout Session Types
// ============================================================================

/// Exercise actually performed during a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseInput {
    pub exercise_id: i64,
    #[validate(range(min = 0, max = 100, message = "sets completed must be between 0 and 100"))]
    pub sets_completed: i32,
    #[validate(range(min = 0, max = 1000, message = "reps must be between 0 and 1000"))]
    pub reps_completed: Option<i32>,
    #[validate(range(min = 0.0, max = 1000.0, message = "weight must be between 0 and 1000 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0, max = 86400, message = "duration must be between 0 and 86400 seconds"))]
    pub duration_seconds: Option<i32>,
    pub notes: Option<String>,
}

/// Log session request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogSessionRequest {
    pub template_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0, max = 1440, message = "duration must be 0-1440 minutes"))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<SessionExerciseInput>,
}

/// Performed exercise on a stored session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseResponse {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub sets_completed: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_completed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Workout session with performed exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSessionResponse {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    pub name: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<SessionExerciseResponse>,
}

/// Session list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<WorkoutSessionResponse>,
}

// ============================================================================
// Food and Nutrition Types
// ============================================================================

/// Food search query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodSearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Food reference entry (values per 100g)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    pub fiber_per_100g: f64,
    pub sugar_per_100g: f64,
    pub sodium_per_100g: f64,
    pub created_at: DateTime<Utc>,
}

/// Food search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFoodsResponse {
    pub foods: Vec<FoodResponse>,
}

/// Log food request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFoodRequest {
    pub food_id: i64,
    pub serving_size_grams: f64,
    pub meal_type: String,
    pub logged_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Stored nutrition log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLogResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub food_id: i64,
    pub serving_size_grams: f64,
    pub meal_type: String,
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One entry of a day's nutrition log, with macros scaled to the serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogEntry {
    pub id: i64,
    pub food_id: i64,
    pub food_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub serving_size_grams: f64,
    pub meal_type: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Day's nutrition logs with rounded totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogsResponse {
    pub date: NaiveDate,
    pub logs: Vec<DailyLogEntry>,
    pub total_calories: i64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub total_sugar: f64,
    pub total_sodium: f64,
}

// ============================================================================
// Progress Types
// ============================================================================

/// Add progress measurement request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProgressRequest {
    pub date_measured: NaiveDate,
    #[validate(length(min = 1, max = 50, message = "measurement type must be 1-50 characters"))]
    pub measurement_type: String,
    pub value: f64,
    #[validate(length(min = 1, max = 20, message = "unit must be 1-20 characters"))]
    pub unit: String,
    pub notes: Option<String>,
}

/// Progress list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    #[serde(alias = "measurement_type")]
    pub measurement_type: Option<String>,
}

/// Stored progress measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMeasurementResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub date_measured: NaiveDate,
    pub measurement_type: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Progress list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProgressResponse {
    pub measurements: Vec<ProgressMeasurementResponse>,
}

// ============================================================================
// Analytics Types
// ============================================================================

/// Trailing window for analytics endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsWindowQuery {
    pub days: Option<i64>,
}

/// Food with its occurrence count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCount {
    pub food_name: String,
    pub count: i64,
}

/// Nutrition totals for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionPoint {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Nutrition statistics over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionStatsResponse {
    pub average_daily_calories: i64,
    pub average_daily_protein: f64,
    pub average_daily_carbs: f64,
    pub average_daily_fat: f64,
    pub total_meals_logged: i64,
    pub most_logged_meal_type: String,
    pub top_foods: Vec<FoodCount>,
    pub weekly_trend: Vec<DailyNutritionPoint>,
}

/// Exercise with its occurrence count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCount {
    pub exercise_name: String,
    pub count: i64,
}

/// Workout statistics over a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStatsResponse {
    pub total_workouts: i64,
    pub total_duration: i64,
    pub average_duration: i64,
    pub workouts_this_week: i64,
    pub workouts_this_month: i64,
    pub most_active_day: String,
    pub popular_exercises: Vec<ExerciseCount>,
}

/// Lifetime workout figures for the overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewWorkoutStats {
    pub total_workouts: i64,
    pub average_rating: f64,
    pub total_duration_minutes: i64,
    pub workouts_this_week: i64,
    pub workouts_this_month: i64,
}

/// Lifetime nutrition figures for the overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewNutritionStats {
    pub average_daily_calories: i64,
    pub average_daily_protein: f64,
    pub average_daily_carbs: f64,
    pub average_daily_fat: f64,
    pub days_logged: i64,
}

/// Progress figures for the overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewProgressStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_weight: Option<f64>,
    #[serde(rename = "weightChange30Days", skip_serializing_if = "Option::is_none")]
    pub weight_change_30_days: Option<f64>,
    pub measurement_types: Vec<String>,
}

/// Most recent activity timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_workout: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_nutrition_log: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_progress_update: Option<NaiveDate>,
}

/// Combined analytics overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub workout_stats: OverviewWorkoutStats,
    pub nutrition_stats: OverviewNutritionStats,
    pub progress_stats: OverviewProgressStats,
    pub recent_activity: RecentActivity,
}
