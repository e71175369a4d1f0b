//! Data models for the reports API
//!
//! Stored records, per-request query parameters and API version selection.

mod query;
mod report;
mod version;

pub use query::*;
pub use report::*;
pub use version::*;
