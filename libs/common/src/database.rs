//! Database module for SQLite connection pooling
//!
//! This module provides pool construction, an idempotent schema bootstrap and
//! a connectivity probe. Connections are never recycled on idle so that
//! in-memory databases survive for the lifetime of the pool.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{error, info};

use crate::error::{DatabaseError, DatabaseResult};

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. `sqlite://sellers.db?mode=rwc` or `sqlite::memory:`)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://sellers.db?mode=rwc".to_string(),
            max_connections: 5,
            connection_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database.
    ///
    /// The pool is capped at a single connection: every SQLite in-memory
    /// connection owns its own database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }
}

/// Initialize a SQLite connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<SqlitePool>` - SQLite connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    info!("Initializing database connection pool");

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Apply a list of idempotent DDL statements in order
///
/// Statements are expected to be written with `IF NOT EXISTS` guards so that
/// running them on every startup is harmless.
pub async fn ensure_schema(pool: &SqlitePool, statements: &[&str]) -> DatabaseResult<()> {
    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(DatabaseError::Schema)?;
    }

    Ok(())
}

/// Check database connectivity
///
/// # Returns
///
/// * `bool` - True if the database answered a trivial query
pub async fn health_check(pool: &SqlitePool) -> bool {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            error!("Database health check failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url, "sqlite://sellers.db?mode=rwc");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connection_timeout, 30);
    }

    #[tokio::test]
    async fn test_in_memory_pool_is_healthy() {
        let pool = init_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory pool");
        assert!(health_check(&pool).await);
    }

    #[tokio::test]
    async fn test_invalid_url_is_configuration_error() {
        let config = DatabaseConfig {
            database_url: "sqlite://sellers.db?mode=bogus".to_string(),
            ..DatabaseConfig::default()
        };

        let err = init_pool(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        let ddl = ["CREATE TABLE IF NOT EXISTS probe (id INTEGER PRIMARY KEY)"];

        ensure_schema(&pool, &ddl).await.unwrap();
        ensure_schema(&pool, &ddl).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_schema_reports_bad_statement() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();

        let err = ensure_schema(&pool, &["CREATE TABLE"]).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Schema(_)));
    }
}
