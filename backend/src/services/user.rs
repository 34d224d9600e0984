//! User service for authentication and profile management

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::user::UserRecord;
use crate::repositories::{CreateProfile, UpdateProfile, UserProfileRecord, UserRepository};
use crate::services::decimal_to_f64;
use fittrack_shared::types::{
    AccountInfo, AuthResponse, CreateProfileRequest, LoginRequest, SignupRequest,
    UpdateProfileRequest, UserProfileResponse,
};
use fittrack_shared::validation::{normalize_email, validate_not_blank, validate_password};
use fittrack_shared::{calculate_bmi, round_to_tenth, ActivityLevel};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// User service for authentication and profile operations
pub struct UserService;

impl UserService {
    /// Create an account and issue its first token
    ///
    /// Password hashing is offloaded to the blocking thread pool.
    pub async fn signup(
        pool: &PgPool,
        tokens: &TokenService,
        min_password_length: usize,
        req: SignupRequest,
    ) -> Result<AuthResponse, ApiError> {
        let req = SignupRequest {
            email: normalize_email(&req.email),
            name: req.name.trim().to_string(),
            ..req
        };
        req.validate()?;
        validate_password(&req.password, min_password_length).map_err(ApiError::InvalidArgument)?;
        validate_not_blank("name", &req.name).map_err(ApiError::InvalidArgument)?;

        if UserRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::AlreadyExists("email already registered".to_string()));
        }

        let hashed = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        // A concurrent signup can still win the race for the email
        let user = UserRepository::create(pool, &req.email, &req.name, &hashed)
            .await
            .map_err(|e| ApiError::from_write(e, "email already registered"))?;

        info!(user_id = %user.id, "User signed up");
        Self::auth_response(tokens, user)
    }

    /// Log in with email and password
    ///
    /// Unknown emails and wrong passwords fail the same way, and both pay
    /// for one argon2 digest.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let email = normalize_email(&req.email);
        let Some(user) = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        else {
            PasswordService::burn_async(req.password)
                .await
                .map_err(ApiError::Internal)?;
            return Err(ApiError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        };

        let valid = PasswordService::verify_async(
            req.password,
            user.password_salt.clone(),
            user.password_hash.clone(),
        )
        .await
        .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        Self::auth_response(tokens, user)
    }

    fn auth_response(tokens: &TokenService, user: UserRecord) -> Result<AuthResponse, ApiError> {
        let token = tokens.issue(user.id).map_err(ApiError::Internal)?;
        Ok(AuthResponse {
            token,
            user: AccountInfo {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        })
    }

    /// Create the caller's profile
    pub async fn create_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateProfileRequest,
    ) -> Result<UserProfileResponse, ApiError> {
        req.validate()?;
        validate_not_blank("name", &req.name).map_err(ApiError::InvalidArgument)?;
        let activity_level = match req.activity_level.as_deref() {
            Some(level) => level.parse::<ActivityLevel>()?,
            None => ActivityLevel::default(),
        };

        if UserRepository::get_profile(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .is_some()
        {
            return Err(ApiError::AlreadyExists("user profile already exists".to_string()));
        }

        let input = CreateProfile {
            name: req.name.trim().to_string(),
            age: req.age,
            weight_kg: req.weight_kg,
            height_cm: req.height_cm,
            activity_level: activity_level.to_string(),
            fitness_goal: req.fitness_goal,
        };

        let record = UserRepository::create_profile(pool, user_id, input)
            .await
            .map_err(|e| ApiError::from_write(e, "user profile already exists"))?;

        Ok(profile_response(record))
    }

    /// Get the caller's profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfileResponse, ApiError> {
        let record = UserRepository::get_profile(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("user profile not found".to_string()))?;

        Ok(profile_response(record))
    }

    /// Update the caller's profile fields
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserProfileResponse, ApiError> {
        req.validate()?;
        if let Some(name) = &req.name {
            validate_not_blank("name", name).map_err(ApiError::InvalidArgument)?;
        }
        let activity_level = req
            .activity_level
            .as_deref()
            .map(str::parse::<ActivityLevel>)
            .transpose()?;

        let input = UpdateProfile {
            name: req.name.map(|n| n.trim().to_string()),
            age: req.age,
            weight_kg: req.weight_kg,
            height_cm: req.height_cm,
            activity_level: activity_level.map(|l| l.to_string()),
            fitness_goal: req.fitness_goal,
        };

        let record = UserRepository::update_profile(pool, user_id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("user profile not found".to_string()))?;

        Ok(profile_response(record))
    }
}

fn profile_response(record: UserProfileRecord) -> UserProfileResponse {
    let weight_kg = record.weight_kg.as_ref().map(decimal_to_f64);
    let height_cm = record.height_cm.as_ref().map(decimal_to_f64);
    let bmi = match (weight_kg, height_cm) {
        (Some(w), Some(h)) => Some(round_to_tenth(calculate_bmi(w, h))),
        _ => None,
    };

    UserProfileResponse {
        id: record.id,
        email: record.email,
        name: record.name,
        age: record.age,
        weight_kg,
        height_cm,
        activity_level: record.activity_level,
        fitness_goal: record.fitness_goal,
        bmi,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
