//! Application state shared by the handlers.

use analytics_db::ReportRepositoryTrait;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<dyn ReportRepositoryTrait>,
}

impl AppState {
    pub fn new(reports: Arc<dyn ReportRepositoryTrait>) -> Self {
        Self { reports }
    }
}
