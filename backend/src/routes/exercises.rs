//! Exercise catalog routes (public)

use crate::error::ApiResult;
use crate::extract::{Json, Path, Query};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Router,
};
use fittrack_shared::types::{ExerciseListQuery, ExerciseResponse, ListExercisesResponse};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises))
        .route("/:id", get(get_exercise))
}

/// GET /api/v1/exercises?category=
async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ExerciseListQuery>,
) -> ApiResult<Json<ListExercisesResponse>> {
    let exercises = ExerciseService::list(state.db(), query.category.as_deref()).await?;
    Ok(Json(ListExercisesResponse { exercises }))
}

/// GET /api/v1/exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::get(state.db(), id).await?;
    Ok(Json(exercise))
}
