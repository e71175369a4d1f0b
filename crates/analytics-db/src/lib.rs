//! Analytics Database Layer
//!
//! Repositories over the report tables: paginated reads for the API and
//! cutoff deletes for the retention job.

pub mod db;

pub use db::*;
