//! PostgreSQL pool, migrations and the readiness ping
//!
//! Repositories borrow the pool, or a transaction connection for
//! multi-row writes.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const APPLICATION_NAME: &str = "fittrack";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Pool sizing derived from configuration
///
/// Keeps a couple of warm connections, never more than the maximum.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let max = config.max_connections.max(1);

    PgPoolOptions::new()
        .max_connections(max)
        .min_connections(max.min(2))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// Connect a pool to the configured database
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("invalid database url")?
        .application_name(APPLICATION_NAME);

    let pool = pool_options(config).connect_with(options).await?;

    info!(
        max_connections = pool.options().get_max_connections(),
        "Database pool created"
    );
    Ok(pool)
}

/// Apply pending migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// `SELECT 1` against the pool
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!("Database health check failed: {}", e);
        anyhow::Error::from(e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 10, 2)]
    #[case(1, 1, 1)]
    #[case(0, 1, 1)]
    fn test_pool_sizing(#[case] configured: u32, #[case] max: u32, #[case] min: u32) {
        let options = pool_options(&DatabaseConfig {
            url: "postgres://localhost/fittrack".to_string(),
            max_connections: configured,
        });
        assert_eq!(options.get_max_connections(), max);
        assert_eq!(options.get_min_connections(), min);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let result = create_pool(&DatabaseConfig {
            url: "not a url".to_string(),
            max_connections: 1,
        })
        .await;
        assert!(result.is_err());
    }
}
