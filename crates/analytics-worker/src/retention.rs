//! Retention scheduler: deletes report rows dated at or before "today minus N months".
//!
//! The cutoff is recomputed on every run. Shutdown: [`RetentionJob::shutdown`] stops the
//! loop after the current run, if any, completes.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use analytics_core::models::ReportTable;
use analytics_core::AppError;
use analytics_db::{retention_cutoff, RetentionRepositoryTrait};

#[derive(Clone, Debug)]
pub struct RetentionConfig {
    /// Rows dated on or before today minus this many months are deleted.
    pub months: u32,
    /// Time between runs. The first run happens immediately.
    pub interval: Duration,
    pub tables: Vec<ReportTable>,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            months: 18,
            interval: Duration::from_secs(24 * 60 * 60),
            tables: ReportTable::ALL.to_vec(),
        }
    }
}

/// Delete rows on or before `cutoff` from each table in turn. Stops at the first failure.
pub async fn purge_tables(
    repository: &dyn RetentionRepositoryTrait,
    tables: &[ReportTable],
    cutoff: NaiveDate,
) -> Result<u64, AppError> {
    let mut total = 0;
    for table in tables {
        total += repository.delete_before(*table, cutoff).await?;
    }
    Ok(total)
}

pub struct RetentionJob {
    shutdown_tx: mpsc::Sender<()>,
}

impl RetentionJob {
    /// Spawn the scheduler loop on the current runtime.
    pub fn start(repository: Arc<dyn RetentionRepositoryTrait>, config: RetentionConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            Self::run(repository, config, shutdown_rx).await;
        });

        Self { shutdown_tx }
    }

    async fn run(
        repository: Arc<dyn RetentionRepositoryTrait>,
        config: RetentionConfig,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(
            months = config.months,
            interval_secs = config.interval.as_secs(),
            "Retention scheduler started"
        );

        let mut interval = tokio::time::interval(config.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let cutoff = retention_cutoff(Utc::now().date_naive(), config.months);
                    match purge_tables(repository.as_ref(), &config.tables, cutoff).await {
                        Ok(deleted) => tracing::info!(%cutoff, deleted, "Retention run completed"),
                        Err(e) => tracing::error!(error = %e, %cutoff, "Retention run failed"),
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }

        tracing::info!("Retention scheduler stopped");
    }

    /// Signal the loop to stop. Returns without waiting for it to exit.
    pub async fn shutdown(&self) {
        tracing::info!("Initiating retention scheduler shutdown");
        let _ = self.shutdown_tx.send(()).await;
    }
}
