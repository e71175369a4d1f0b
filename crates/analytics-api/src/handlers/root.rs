use axum::{response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentTimeResponse {
    /// Server time, ISO-8601 in UTC with millisecond precision.
    #[schema(example = "2024-01-31T12:00:00.000Z")]
    pub current_time: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses(
        (status = 200, description = "Server time; never requires the access secret", body = CurrentTimeResponse)
    )
)]
pub async fn current_time() -> impl IntoResponse {
    Json(CurrentTimeResponse {
        current_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
