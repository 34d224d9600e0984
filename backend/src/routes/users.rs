//! Profile routes for the authenticated user

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::Json;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use fittrack_shared::types::{CreateProfileRequest, UpdateProfileRequest, UserProfileResponse};

/// Create user profile routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/me", get(get_profile).put(update_profile))
}

/// POST /api/v1/users
async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = UserService::create_profile(state.db(), auth.user_id, req).await?;
    Ok(Json(profile))
}

/// GET /api/v1/users/me
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = UserService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/users/me
///
/// Only the fields present in the body change.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = UserService::update_profile(state.db(), auth.user_id, req).await?;
    Ok(Json(profile))
}
