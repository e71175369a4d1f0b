//! Database repositories for data access layer
//!
//! `report` serves the read path of the API, `retention` the scheduled cleanup.
//! `pool` builds the connection pool both binaries share.

pub mod pool;
pub mod report;
pub mod retention;

pub use pool::{connect_options, create_pool};
pub use report::{build_report_query, PostgresReportRepository, QueryArg, ReportQuery, ReportRepositoryTrait};
pub use retention::{retention_cutoff, PostgresRetentionRepository, RetentionRepositoryTrait};
