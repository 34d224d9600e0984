//! Progress measurement routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{Json, Query};
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Router,
};
use fittrack_shared::types::{
    AddProgressRequest, ListProgressResponse, ProgressMeasurementResponse, ProgressQuery,
};

/// Create progress routes
pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/", get(list_measurements).post(add_measurement))
}

/// POST /api/v1/progress
async fn add_measurement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddProgressRequest>,
) -> ApiResult<Json<ProgressMeasurementResponse>> {
    let measurement = ProgressService::add(state.db(), auth.user_id, req).await?;
    Ok(Json(measurement))
}

/// GET /api/v1/progress?measurement_type=
async fn list_measurements(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProgressQuery>,
) -> ApiResult<Json<ListProgressResponse>> {
    let measurements =
        ProgressService::list(state.db(), auth.user_id, query.measurement_type.as_deref()).await?;
    Ok(Json(ListProgressResponse { measurements }))
}
