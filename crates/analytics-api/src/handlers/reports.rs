use crate::error::{ErrorResponse, HttpAppError};
use crate::shaping::shape_records;
use crate::state::AppState;
use analytics_core::models::{is_domain_filterable, ApiVersion, ReportQueryString, ReportScope};
use analytics_core::validation::validate_report_query;
use analytics_core::AppError;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

type RawReportQuery = Result<Query<ReportQueryString>, QueryRejection>;

/// Version, whitelist and validation run in that order, all before touching the database.
/// A query string that fails to deserialize is reported only once the version is known.
async fn fetch_report_data(
    state: &AppState,
    version: &str,
    scope: ReportScope,
    query: RawReportQuery,
) -> Result<impl IntoResponse, HttpAppError> {
    let version = ApiVersion::from_segment(version);
    let table = version
        .table()
        .ok_or_else(|| AppError::UnsupportedVersion(version.to_string()))?;

    if scope.domain.is_some() && !is_domain_filterable(&scope.report_name) {
        return Err(AppError::DomainFilterUnsupported(scope.report_name).into());
    }

    let Query(query) = query?;
    let params = validate_report_query(&query, scope, table)?;

    let records = state
        .reports
        .query_reports(&params)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(shape_records(records, &version)))
}

#[utoipa::path(
    get,
    path = "/{version}/reports/{report_name}/data",
    tag = "reports",
    params(
        ("version" = String, Path, description = "API version, `v1.1` or `v2`"),
        ("report_name" = String, Path, description = "Report name, e.g. `site`"),
        ReportQueryString
    ),
    responses(
        (status = 200, description = "Report data points without an agency", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid request params", body = ErrorResponse),
        (status = 403, description = "Missing or incorrect access secret", body = ErrorResponse),
        (status = 404, description = "Unsupported API version", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_report_data(
    State(state): State<Arc<AppState>>,
    Path((version, report_name)): Path<(String, String)>,
    query: RawReportQuery,
) -> Result<impl IntoResponse, HttpAppError> {
    fetch_report_data(&state, &version, ReportScope::report(report_name), query).await
}

#[utoipa::path(
    get,
    path = "/{version}/agencies/{report_agency}/reports/{report_name}/data",
    tag = "reports",
    params(
        ("version" = String, Path, description = "API version, `v1.1` or `v2`"),
        ("report_agency" = String, Path, description = "Agency the report was produced for"),
        ("report_name" = String, Path, description = "Report name, e.g. `site`"),
        ReportQueryString
    ),
    responses(
        (status = 200, description = "Report data points for the agency", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid request params", body = ErrorResponse),
        (status = 403, description = "Missing or incorrect access secret", body = ErrorResponse),
        (status = 404, description = "Unsupported API version", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_agency_report_data(
    State(state): State<Arc<AppState>>,
    Path((version, report_agency, report_name)): Path<(String, String, String)>,
    query: RawReportQuery,
) -> Result<impl IntoResponse, HttpAppError> {
    fetch_report_data(
        &state,
        &version,
        ReportScope::agency(report_agency, report_name),
        query,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/{version}/domain/{domain}/reports/{report_name}/data",
    tag = "reports",
    params(
        ("version" = String, Path, description = "API version, `v1.1` or `v2`"),
        ("domain" = String, Path, description = "Domain to filter on, e.g. `www.gsa.gov`"),
        ("report_name" = String, Path, description = "One of `site`, `domain`, `download`, `second-level-domain`"),
        ReportQueryString
    ),
    responses(
        (status = 200, description = "Report data points for the domain", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid request params or report not filterable by domain", body = ErrorResponse),
        (status = 403, description = "Missing or incorrect access secret", body = ErrorResponse),
        (status = 404, description = "Unsupported API version", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_domain_report_data(
    State(state): State<Arc<AppState>>,
    Path((version, domain, report_name)): Path<(String, String, String)>,
    query: RawReportQuery,
) -> Result<impl IntoResponse, HttpAppError> {
    fetch_report_data(
        &state,
        &version,
        ReportScope::domain(domain, report_name),
        query,
    )
    .await
}
