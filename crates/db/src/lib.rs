//! SQLite persistence for the meal catalog.
//!
//! The pool is owned by the caller; [`catalog::MealCatalog`] only borrows
//! one connection per operation from it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

pub use catalog::MealCatalog;
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, CatalogResult, ErrorKind};

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL, creating the file if needed.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create a connection pool from the `DATABASE_URL` and `DB_MAX_CONNECTIONS`
/// settings.
pub async fn create_pool_from(config: &CatalogConfig) -> Result<DbPool, sqlx::Error> {
    create_pool(&config.database_url, config.max_connections).await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
