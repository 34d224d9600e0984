//! Food search and nutrition log routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{Json, Path, Query};
use crate::services::nutrition::parse_log_date;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use fittrack_shared::types::{
    DailyLogsResponse, FoodResponse, FoodSearchQuery, LogFoodRequest, NutritionLogResponse,
    SearchFoodsResponse,
};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/foods/:id", get(get_food))
        .route("/logs", post(log_food))
        .route("/logs/:date", get(daily_logs))
}

/// GET /api/v1/nutrition/foods/search?query=
async fn search_foods(
    State(state): State<AppState>,
    Query(query): Query<FoodSearchQuery>,
) -> ApiResult<Json<SearchFoodsResponse>> {
    let foods = NutritionService::search_foods(state.db(), &query.query).await?;
    Ok(Json(SearchFoodsResponse { foods }))
}

/// GET /api/v1/nutrition/foods/:id
async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FoodResponse>> {
    let food = NutritionService::get_food(state.db(), id).await?;
    Ok(Json(food))
}

/// POST /api/v1/nutrition/logs
async fn log_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<Json<NutritionLogResponse>> {
    let log = NutritionService::log_food(state.db(), auth.user_id, req).await?;
    Ok(Json(log))
}

/// GET /api/v1/nutrition/logs/:date
///
/// `date` is a UTC calendar day, `YYYY-MM-DD`.
async fn daily_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyLogsResponse>> {
    let date = parse_log_date(&date)?;
    let logs = NutritionService::daily_logs(state.db(), auth.user_id, date).await?;
    Ok(Json(logs))
}
