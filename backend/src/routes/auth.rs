//! Authentication routes
//!
//! Signup and login return a bearer token plus the account. `/me` echoes
//! the identity resolved by the [`AuthUser`] extractor.

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
use fittrack_shared::types::{AccountInfo, AuthResponse, LoginRequest, SignupRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// POST /api/v1/auth/signup
///
/// Password hashing runs on the blocking thread pool.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = UserService::signup(
        state.db(),
        state.tokens(),
        state.config().auth.min_password_length,
        req,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = UserService::login(state.db(), state.tokens(), req).await?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me
async fn me(auth: AuthUser) -> Json<AccountInfo> {
    Json(AccountInfo {
        id: auth.user_id,
        email: auth.email,
        name: auth.name,
    })
}
