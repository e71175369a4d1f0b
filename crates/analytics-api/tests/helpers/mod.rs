//! Test helpers: build the real router over an in-memory report repository.
//!
//! Run from workspace root: `cargo test -p analytics-api`. No database is needed;
//! SQL behavior is covered by the analytics-db repository tests.

#![allow(dead_code)]

use analytics_api::setup::routes;
use analytics_api::state::AppState;
use analytics_core::models::{AnalyticsRecord, QueryParams};
use analytics_core::{AppError, Config};
use analytics_db::ReportRepositoryTrait;
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "test-secret-value";

/// Returns canned records and remembers every query it was asked to run.
#[derive(Default)]
pub struct FakeReportRepository {
    records: Vec<AnalyticsRecord>,
    fail: bool,
    queries: Mutex<Vec<QueryParams>>,
}

impl FakeReportRepository {
    pub fn with_records(records: Vec<AnalyticsRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<QueryParams> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> QueryParams {
        self.queries()
            .pop()
            .expect("repository was never queried")
    }
}

#[async_trait::async_trait]
impl ReportRepositoryTrait for FakeReportRepository {
    async fn query_reports(&self, params: &QueryParams) -> Result<Vec<AnalyticsRecord>, AppError> {
        self.queries.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(AppError::from(sqlx::Error::PoolTimedOut));
        }
        Ok(self.records.clone())
    }
}

pub fn record(
    id: i32,
    report_name: &str,
    date: Option<&str>,
    data: serde_json::Value,
) -> AnalyticsRecord {
    AnalyticsRecord {
        id,
        report_name: report_name.to_string(),
        report_agency: None,
        date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        data: Some(data),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Test application: server plus the repository behind it.
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<FakeReportRepository>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

pub fn setup_test_app_with(vars: &[(&str, &str)], repository: FakeReportRepository) -> TestApp {
    let config = create_test_config(vars);
    let repository = Arc::new(repository);
    let state = Arc::new(AppState::new(repository.clone()));
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, repository }
}

/// App with the access secret configured and an empty repository.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(
        &[("API_DATA_GOV_SECRET", TEST_SECRET)],
        FakeReportRepository::default(),
    )
}
