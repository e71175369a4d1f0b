use analytics_core::models::ReportTable;
use analytics_core::AppError;
use chrono::{Months, NaiveDate};
use sqlx::PgPool;

/// Trait for historical data cleanup
#[async_trait::async_trait]
pub trait RetentionRepositoryTrait: Send + Sync {
    /// Delete every row of `table` dated on or before `cutoff`. Returns the number deleted.
    async fn delete_before(&self, table: ReportTable, cutoff: NaiveDate) -> Result<u64, AppError>;
}

/// First date no longer retained: `today` minus `months` calendar months.
///
/// Day-of-month is clamped to the target month, so 2024-03-31 minus one month is 2024-02-29.
pub fn retention_cutoff(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Clone)]
pub struct PostgresRetentionRepository {
    pool: PgPool,
}

impl PostgresRetentionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RetentionRepositoryTrait for PostgresRetentionRepository {
    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = %table,
        db.operation = "delete"
    ))]
    async fn delete_before(&self, table: ReportTable, cutoff: NaiveDate) -> Result<u64, AppError> {
        tracing::info!(%cutoff, "About to delete records from before cutoff");

        let sql = format!(r#"DELETE FROM {} WHERE "date" < $1::date + 1"#, table.table_name());
        let result = sqlx::query(&sql)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to delete historical report data");
                AppError::from(e)
            })?;

        let deleted = result.rows_affected();
        tracing::info!(
            deleted,
            "Deleted {} records as part of monthly historical data cleanup",
            deleted
        );
        Ok(deleted)
    }
}
