//! Database setup and initialization

use analytics_core::Config;
use anyhow::{Context, Result};
use sqlx::PgPool;

/// Open the connection pool and, unless disabled, apply pending migrations.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = analytics_db::create_pool(config).await?;

    if config.run_migrations() {
        // Path: workspace migrations/ from crate root
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    Ok(pool)
}
