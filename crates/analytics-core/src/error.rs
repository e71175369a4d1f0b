//! Error types module
//!
//! All failures the API can report are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the HTTP
//! layer only has to render what the error says about itself.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

use crate::models::DOMAIN_FILTERABLE_REPORTS;

/// Message returned to callers when the access secret is missing or wrong.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. See https://analytics.usa.gov/developer";

/// Message returned for any route addressed to a version we do not serve.
pub const UNSUPPORTED_VERSION_MESSAGE: &str =
    "Version not found. Visit https://open.gsa.gov/api/dap/ for information on supported API versions.";

/// Message returned when a storage failure reaches the HTTP boundary.
pub const STORAGE_FAILURE_MESSAGE: &str = "An error occurred. Please check the application logs.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client mistakes such as validation failures
    Debug,
    /// Rejected access attempts
    Warn,
    /// Unexpected server-side failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether the internal detail must stay out of responses
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    /// One or more request parameters failed validation; holds the detail text.
    #[error("Invalid request params: {0}")]
    InvalidParams(String),

    /// A domain filter was requested on a report that cannot be filtered by domain.
    #[error("Report '{0}' cannot be filtered on domain")]
    DomainFilterUnsupported(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The path carried a version segment we do not serve.
    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::InvalidParams(_) => (400, "INVALID_PARAMS", false, LogLevel::Debug),
        AppError::DomainFilterUnsupported(_) => {
            (400, "DOMAIN_FILTER_UNSUPPORTED", false, LogLevel::Debug)
        }
        AppError::Unauthorized(_) => (403, "UNAUTHORIZED", false, LogLevel::Warn),
        AppError::UnsupportedVersion(_) => (404, "UNSUPPORTED_VERSION", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidParams(_) => "InvalidParams",
            AppError::DomainFilterUnsupported(_) => "DomainFilterUnsupported",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::UnsupportedVersion(_) => "UnsupportedVersion",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => STORAGE_FAILURE_MESSAGE.to_string(),
            AppError::InvalidParams(ref detail) => format!("Invalid request params: {}", detail),
            AppError::DomainFilterUnsupported(_) => format!(
                "You are requesting a report that cannot be filtered on domain. \
                 Please try one of the following reports: {}.",
                DOMAIN_FILTERABLE_REPORTS.join(", ")
            ),
            AppError::Unauthorized(_) => UNAUTHORIZED_MESSAGE.to_string(),
            AppError::UnsupportedVersion(_) => UNSUPPORTED_VERSION_MESSAGE.to_string(),
            AppError::Internal(_) => STORAGE_FAILURE_MESSAGE.to_string(),
            AppError::InternalWithSource { .. } => STORAGE_FAILURE_MESSAGE.to_string(),
        }
    }
}
