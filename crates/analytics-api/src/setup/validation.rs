//! Configuration validation
//!
//! Checks configuration at startup so misconfiguration fails before the server binds.

use analytics_core::Config;
use anyhow::Result;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.is_production() && config.access_secret().is_none() {
        tracing::warn!(
            "API_DATA_GOV_SECRET is not set in production - every route is publicly readable"
        );
    }

    if config.retention_enabled() {
        tracing::info!(
            retention_months = config.retention_months(),
            retention_interval_hours = config.retention_interval_hours(),
            "Retention scheduler enabled"
        );
    }

    Ok(())
}
