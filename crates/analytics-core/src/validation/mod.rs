//! Validation modules

pub mod params;

pub use params::{validate_report_query, FieldError, ParamValidationError, DATE_FORMAT_HINT};
