//! Postgres connection pool for the question store.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Shared Postgres pool handed to [`PgQuestionStore`](crate::PgQuestionStore).
pub type DbPool = PgPool;

/// Connection settings, usually filled from CLI flags / environment.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub database_url: String,
    /// Pool ceiling.
    pub max_connections: u32,
    /// How long a query waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Open a pool against `config.database_url`.
pub async fn create_pool(config: &PoolConfig) -> Result<DbPool, DbError> {
    info!(
        max_connections = config.max_connections,
        acquire_timeout = ?config.acquire_timeout,
        "connecting to question database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
