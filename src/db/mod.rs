//! Database module.
//!
//! The pool speaks `sqlx`'s Any driver so the same repository code runs
//! against the production MySQL instance and the SQLite databases the tests
//! use.

mod repository;

pub use repository::*;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use std::time::Duration;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(database_url: &str) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &AnyPool) -> Result<(), sqlx::Error> {
    // One statement per execute; the MySQL driver rejects multi-statement text.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS topics (
            topic VARCHAR(255) PRIMARY KEY,
            count BIGINT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS strikes (
            user_id VARCHAR(255) PRIMARY KEY,
            count BIGINT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
