//! Analytics Reports API Library
//!
//! HTTP handlers, middleware, response shaping and application setup.

// Module declarations
mod api_doc;
mod handlers;
mod middleware;
mod shaping;
mod telemetry;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use shaping::{shape_record, shape_records};
