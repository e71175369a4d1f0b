use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Deprecation notice attached to every record served through the legacy version.
pub const LEGACY_NOTICE: &str = "v1.1 is deprecated and serves data collected with Universal Analytics. \
     Use v2 for current data. See https://open.gsa.gov/api/dap/";

/// API version selected by the leading path segment (e.g. `v1.1`, `v2`).
///
/// Unknown segments are kept as [`ApiVersion::Unsupported`] so routing can answer
/// them with a 404 instead of failing to parse the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiVersion {
    /// Legacy API backed by `analytics_data`.
    V1_1,
    /// Current API backed by `analytics_data_ga4`.
    V2,
    Unsupported(String),
}

/// Backing table for a report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportTable {
    Legacy,
    Current,
}

impl ReportTable {
    pub const ALL: [ReportTable; 2] = [ReportTable::Legacy, ReportTable::Current];

    pub fn table_name(&self) -> &'static str {
        match self {
            ReportTable::Legacy => "analytics_data",
            ReportTable::Current => "analytics_data_ga4",
        }
    }
}

impl Display for ReportTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.table_name())
    }
}

impl ApiVersion {
    /// Parse a path segment. Only `v1.1` and `v2` are known; anything else is kept verbatim.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "v1.1" => ApiVersion::V1_1,
            "v2" => ApiVersion::V2,
            _ => ApiVersion::Unsupported(segment.to_string()),
        }
    }

    /// Version string as it appears in query parameters (`1.1`, `2`).
    pub fn as_str(&self) -> &str {
        match self {
            ApiVersion::V1_1 => "1.1",
            ApiVersion::V2 => "2",
            ApiVersion::Unsupported(raw) => raw,
        }
    }

    /// Table this version reads from; `None` for unsupported versions.
    pub fn table(&self) -> Option<ReportTable> {
        match self {
            ApiVersion::V1_1 => Some(ReportTable::Legacy),
            ApiVersion::V2 => Some(ReportTable::Current),
            ApiVersion::Unsupported(_) => None,
        }
    }

    /// Deprecation notice to embed in each shaped record, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ApiVersion::V1_1 => Some(LEGACY_NOTICE),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ApiVersion::Unsupported(_))
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ApiVersion::Unsupported(raw) => f.write_str(raw),
            known => write!(f, "v{}", known.as_str()),
        }
    }
}
