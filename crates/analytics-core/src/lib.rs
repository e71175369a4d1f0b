//! Analytics Core Library
//!
//! Domain models, error types, configuration and request validation shared by the
//! reports API, the database layer, the retention worker and the operational binaries.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DatabaseTarget, LogFormat, ReporterConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AnalyticsRecord, ApiVersion, QueryParams, ReportScope, ReportTable};
