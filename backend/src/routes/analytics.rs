//! Analytics routes
//!
//! `days` defaults to 30 and accepts 1 to 365.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{Json, Query};
use crate::services::AnalyticsService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Router,
};
use fittrack_shared::types::{
    AnalyticsWindowQuery, NutritionStatsResponse, OverviewResponse, WorkoutStatsResponse,
};

/// Create analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition", get(nutrition_stats))
        .route("/workouts", get(workout_stats))
        .route("/overview", get(overview))
}

/// GET /api/v1/analytics/nutrition?days=
async fn nutrition_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AnalyticsWindowQuery>,
) -> ApiResult<Json<NutritionStatsResponse>> {
    let stats = AnalyticsService::nutrition_stats(state.db(), auth.user_id, query.days).await?;
    Ok(Json(stats))
}

/// GET /api/v1/analytics/workouts?days=
async fn workout_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AnalyticsWindowQuery>,
) -> ApiResult<Json<WorkoutStatsResponse>> {
    let stats = AnalyticsService::workout_stats(state.db(), auth.user_id, query.days).await?;
    Ok(Json(stats))
}

/// GET /api/v1/analytics/overview
async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<OverviewResponse>> {
    let overview = AnalyticsService::overview(state.db(), auth.user_id).await?;
    Ok(Json(overview))
}
