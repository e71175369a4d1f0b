use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Report names that can be scoped to a single domain.
pub const DOMAIN_FILTERABLE_REPORTS: [&str; 4] = ["site", "domain", "download", "second-level-domain"];

/// Report whose domain filter matches on the `page` field instead of `domain`.
pub const DOWNLOAD_REPORT: &str = "download";

pub fn is_domain_filterable(report_name: &str) -> bool {
    DOMAIN_FILTERABLE_REPORTS.contains(&report_name)
}

/// One stored data point of a report, as read from either backing table.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AnalyticsRecord {
    pub id: i32,
    pub report_name: String,
    pub report_agency: Option<String>,
    pub date: Option<NaiveDate>,
    /// Report-specific payload (e.g. `domain`, `page`, `visits`).
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
