//! Workout template and session routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{Json, Path};
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Router,
};
use fittrack_shared::types::{
    CreateTemplateRequest, ListSessionsResponse, ListTemplatesResponse, LogSessionRequest,
    WorkoutSessionResponse, WorkoutTemplateDetailResponse,
};

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/:id", get(get_template))
        .route("/sessions", get(list_sessions).post(log_session))
        .route("/sessions/:id", get(get_session))
}

/// POST /api/v1/workouts/templates
///
/// The template and its exercises are written in one transaction.
async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTemplateRequest>,
) -> ApiResult<Json<WorkoutTemplateDetailResponse>> {
    let template = WorkoutService::create_template(state.db(), auth.user_id, req).await?;
    Ok(Json(template))
}

/// GET /api/v1/workouts/templates
async fn list_templates(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ListTemplatesResponse>> {
    let templates = WorkoutService::list_templates(state.db(), auth.user_id).await?;
    Ok(Json(ListTemplatesResponse { templates }))
}

/// GET /api/v1/workouts/templates/:id
async fn get_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<WorkoutTemplateDetailResponse>> {
    let template = WorkoutService::get_template(state.db(), auth.user_id, id).await?;
    Ok(Json(template))
}

/// POST /api/v1/workouts/sessions
async fn log_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogSessionRequest>,
) -> ApiResult<Json<WorkoutSessionResponse>> {
    let session = WorkoutService::log_session(state.db(), auth.user_id, req).await?;
    Ok(Json(session))
}

/// GET /api/v1/workouts/sessions
async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ListSessionsResponse>> {
    let sessions = WorkoutService::list_sessions(state.db(), auth.user_id).await?;
    Ok(Json(ListSessionsResponse { sessions }))
}

/// GET /api/v1/workouts/sessions/:id
async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<WorkoutSessionResponse>> {
    let session = WorkoutService::get_session(state.db(), auth.user_id, id).await?;
    Ok(Json(session))
}
