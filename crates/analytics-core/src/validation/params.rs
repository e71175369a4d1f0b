//! Query-string validation for the report data routes
//!
//! Turns the raw query string plus the path scope into a normalized [`QueryParams`],
//! or reports every offending parameter at once.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;
use crate::models::{QueryParams, ReportQueryString, ReportScope, ReportTable, MAX_LIMIT};

/// Format every date bound must follow.
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD";

// Shape and ranges only; 2024-02-31 passes and is left to the database.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .unwrap_or_else(|e| panic!("date pattern must compile: {e}"))
});

/// A single rejected query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_errors(.errors))]
pub struct ParamValidationError {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ParamValidationError> for AppError {
    fn from(err: ParamValidationError) -> Self {
        AppError::InvalidParams(err.to_string())
    }
}

/// Validate the query string of a data request and build its [`QueryParams`].
///
/// Path parameters in `scope` are taken as-is. All failing fields are reported together.
pub fn validate_report_query(
    raw: &ReportQueryString,
    scope: ReportScope,
    table: ReportTable,
) -> Result<QueryParams, ParamValidationError> {
    let mut errors = Vec::new();

    check_date("before", raw.before.as_deref(), &mut errors);
    check_date("after", raw.after.as_deref(), &mut errors);

    let limit = raw.limit.as_deref().and_then(|value| {
        match parse_positive_integer(value) {
            Some(limit) if limit <= MAX_LIMIT => Some(limit),
            _ => {
                errors.push(FieldError {
                    field: "limit",
                    message: format!("must be a positive integer no greater than {}", MAX_LIMIT),
                });
                None
            }
        }
    });

    let page = raw.page.as_deref().and_then(|value| match parse_positive_integer(value) {
        Some(page) => Some(page),
        None => {
            errors.push(FieldError {
                field: "page",
                message: "must be a positive integer".to_string(),
            });
            None
        }
    });

    if !errors.is_empty() {
        return Err(ParamValidationError { errors });
    }

    let mut params = QueryParams::from_scope(scope, table);
    if let Some(before) = &raw.before {
        params = params.with_before(before.as_str());
    }
    if let Some(after) = &raw.after {
        params = params.with_after(after.as_str());
    }
    if let Some(limit) = limit {
        params = params.with_limit(limit);
    }
    if let Some(page) = page {
        params = params.with_page(page);
    }

    Ok(params)
}

fn check_date(field: &'static str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(value) = value {
        if !DATE_PATTERN.is_match(value) {
            errors.push(FieldError {
                field,
                message: format!("must be a date in the format '{}'", DATE_FORMAT_HINT),
            });
        }
    }
}

fn parse_positive_integer(value: &str) -> Option<i64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<i64>().ok().filter(|n| *n > 0)
}
