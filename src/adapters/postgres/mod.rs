//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresCredentialStore` - Accounts in `users`
//! - `PostgresPlanStore` - Saved plans in `lesson_plans`

mod credential_store;
mod plan_store;

pub use credential_store::PostgresCredentialStore;
pub use plan_store::PostgresPlanStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens a connection pool, applying the embedded migrations when configured.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(pool)
}
