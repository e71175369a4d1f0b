//! Analytics Worker
//!
//! Periodic deletion of report rows older than the retention window.

pub mod retention;

pub use retention::{purge_tables, RetentionConfig, RetentionJob};
