//! Connection pool construction

use analytics_core::{Config, DatabaseTarget};
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Translate the configured target into connection options.
pub fn connect_options(target: &DatabaseTarget) -> Result<PgConnectOptions> {
    match target {
        DatabaseTarget::Url(url) => {
            PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid Postgres URL")
        }
        DatabaseTarget::Parts {
            host,
            port,
            user,
            password,
            database,
        } => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(database);
            Ok(match password {
                Some(password) => options.password(password),
                None => options,
            })
        }
    }
}

/// Open the shared pool. The caller owns it and closes it on shutdown.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .min_connections(config.db_min_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options(config.database())?)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        min_connections = config.db_min_connections(),
        "Database connected successfully"
    );

    Ok(pool)
}
