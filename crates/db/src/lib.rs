//! Postgres persistence for the service marketplace.
//!
//! Exposes pool construction, a health probe, embedded migrations, the
//! row/DTO structs under [`models`] and the `*Repo` query sets under
//! [`repositories`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Shared connection pool type.
pub type DbPool = PgPool;

/// Maximum pooled connections per process.
const MAX_CONNECTIONS: u32 = 10;

/// How long to wait for a free connection before failing a request.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection pool against `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
