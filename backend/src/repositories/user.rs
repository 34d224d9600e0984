//! User repository for database operations

use crate::auth::HashedPassword;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User joined with profile details
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfileRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub weight_kg: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub activity_level: String,
    pub fitness_goal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a profile
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub name: String,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: String,
    pub fitness_goal: Option<String>,
}

/// Input for updating a profile, `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    pub fitness_goal: Option<String>,
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, password_salt, created_at, updated_at";

const PROFILE_SELECT: &str = r#"
    SELECT u.id, u.email, u.name, p.age, p.weight_kg, p.height_cm,
           p.activity_level, p.fitness_goal, p.created_at, p.updated_at
    FROM user_profiles p
    JOIN users u ON u.id = p.user_id
    WHERE p.user_id = $1
"#;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new account
    pub async fn create(
        pool: &PgPool,
        email: &str,
        name: &str,
        password: &HashedPassword,
    ) -> Result<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash, password_salt)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(name)
        .bind(&password.hash)
        .bind(&password.salt)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;

        Ok(exists.0)
    }

    /// Get the profile of a user, if one was created
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfileRecord>> {
        let record = sqlx::query_as::<_, UserProfileRecord>(PROFILE_SELECT)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Create the profile row and update the display name together
    pub async fn create_profile(
        pool: &PgPool,
        user_id: Uuid,
        input: CreateProfile,
    ) -> Result<UserProfileRecord> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(&input.name)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles
                (user_id, age, weight_kg, height_cm, activity_level, fitness_goal)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(input.age)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(&input.activity_level)
        .bind(&input.fitness_goal)
        .execute(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, UserProfileRecord>(PROFILE_SELECT)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Update profile fields in place
    ///
    /// Returns `None` when the user has no profile yet.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        input: UpdateProfile,
    ) -> Result<Option<UserProfileRecord>> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE user_profiles SET
                age = COALESCE($2, age),
                weight_kg = COALESCE($3, weight_kg),
                height_cm = COALESCE($4, height_cm),
                activity_level = COALESCE($5, activity_level),
                fitness_goal = COALESCE($6, fitness_goal),
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(input.age)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(&input.activity_level)
        .bind(&input.fitness_goal)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(name) = &input.name {
            sqlx::query("UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        let record = sqlx::query_as::<_, UserProfileRecord>(PROFILE_SELECT)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(record))
    }
}
