//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPaymentLogRepository` - append-only payment log
//! - `create_pool` / `run_migrations` - pool setup from `DatabaseConfig`

mod payment_log_repository;

pub use payment_log_repository::PostgresPaymentLogRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Open a connection pool sized and timed by the configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Apply the migrations bundled from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
