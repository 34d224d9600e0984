//! Authentication extractor
//!
//! Resolves the `Authorization: Bearer <token>` header to a stored user.
//! Every failure, including a token for a user that no longer exists,
//! is reported as the same `unauthenticated` error.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};
use uuid::Uuid;

const UNAUTHENTICATED: &str = "missing or invalid credentials";

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

/// Pull the raw token out of an `Authorization` header value
pub(crate) fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthenticated(UNAUTHENTICATED.to_string()))?;

        let user_id = app_state.tokens().verify(token).map_err(|e| {
            debug!(reason = %e, "Rejected bearer token");
            ApiError::Unauthenticated(UNAUTHENTICATED.to_string())
        })?;

        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await
            .map_err(|e| {
                warn!(%user_id, error = %e, "User lookup failed during authentication");
                ApiError::Unauthenticated(UNAUTHENTICATED.to_string())
            })?
            .ok_or_else(|| {
                debug!(%user_id, "Token for unknown user");
                ApiError::Unauthenticated(UNAUTHENTICATED.to_string())
            })?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}
