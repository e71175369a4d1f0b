//! Application setup and initialization
//!
//! Everything `main` needs: configuration checks, tracing, the pool, the optional
//! retention scheduler and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use analytics_core::Config;
use analytics_db::{PostgresReportRepository, PostgresRetentionRepository};
use analytics_worker::{RetentionConfig, RetentionJob};
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// A fully initialized application. Owns the pool and the scheduler until [`App::shutdown`].
pub struct App {
    pub state: Arc<AppState>,
    pub router: axum::Router,
    pool: PgPool,
    retention: Option<RetentionJob>,
}

impl App {
    /// Stop the scheduler and close the pool.
    pub async fn shutdown(self) {
        if let Some(retention) = &self.retention {
            retention.shutdown().await;
        }
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<App> {
    crate::telemetry::init_telemetry(config.log_level(), config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let retention = config.retention_enabled().then(|| {
        RetentionJob::start(
            Arc::new(PostgresRetentionRepository::new(pool.clone())),
            RetentionConfig {
                months: config.retention_months(),
                interval: Duration::from_secs(config.retention_interval_hours() * 60 * 60),
                ..RetentionConfig::default()
            },
        )
    });

    let state = Arc::new(AppState::new(Arc::new(PostgresReportRepository::new(
        pool.clone(),
    ))));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok(App {
        state,
        router,
        pool,
        retention,
    })
}
