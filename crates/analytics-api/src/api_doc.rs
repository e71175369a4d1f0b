//! OpenAPI documentation, served at `/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use analytics_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Analytics Reports API",
        version = "2.0.0",
        description = "Read-only access to stored web analytics reports. Every route except `/` \
                       requires the access secret header when one is configured."
    ),
    paths(
        handlers::root::current_time,
        handlers::reports::get_report_data,
        handlers::reports::get_agency_report_data,
        handlers::reports::get_domain_report_data,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::root::CurrentTimeResponse,
        models::ReportQueryString,
        models::AnalyticsRecord,
    )),
    tags(
        (name = "status", description = "Liveness and server time"),
        (name = "reports", description = "Report data by name, agency or domain")
    )
)]
pub struct ApiDoc;
