//! Application state management
//!
//! Shared resources passed to all request handlers via Axum's state
//! extraction. Everything here is cheap to clone and read-only once built.

use crate::auth::TokenService;
use crate::config::AppConfig;
use anyhow::Result;
use secrecy::SecretString;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token signer keyed with the configured secret
    pub tokens: TokenService,
}

impl AppState {
    /// Create a new application state
    ///
    /// The token signing key is derived here once, from the configured secret.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let secret = SecretString::new(config.auth.token_secret.clone());
        let tokens = TokenService::new(&secret, config.auth.token_ttl_secs)?;

        Ok(Self {
            db,
            config: Arc::new(config),
            tokens,
        })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
