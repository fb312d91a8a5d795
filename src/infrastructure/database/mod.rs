//! Database Module
//!
//! PostgreSQL connection pool, schema migrations and liveness ping.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;

/// Failure while bringing the database up at startup
#[derive(Debug, thiserror::Error)]
pub enum DatabaseInitError {
    #[error("Failed to connect to the database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Open the pool and, if configured, bring the schema up to date.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DatabaseInitError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await?;
    tracing::info!(
        max_connections = settings.max_connections,
        "Database connection pool created"
    );

    if settings.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

/// Round-trip a trivial query
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
