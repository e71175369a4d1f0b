use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::report::DOWNLOAD_REPORT;
use super::version::ReportTable;

/// Rows returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: i64 = 1000;

/// Largest page size the API will ever serve.
pub const MAX_LIMIT: i64 = 10_000;

/// Query-string parameters of every data route, exactly as received.
///
/// Values stay as strings so the validator can report malformed input itself
/// rather than relying on extractor rejections.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(default)]
pub struct ReportQueryString {
    /// Only return data points on or before this date (`YYYY-MM-DD`).
    #[param(example = "2024-01-31")]
    pub before: Option<String>,

    /// Only return data points on or after this date (`YYYY-MM-DD`).
    #[param(example = "2024-01-01")]
    pub after: Option<String>,

    /// Page size (default: 1000, max: 10000, min: 1)
    #[param(minimum = 1, maximum = 10000, example = 1000)]
    pub limit: Option<String>,

    /// 1-indexed page number (default: 1)
    #[param(minimum = 1, example = 1)]
    pub page: Option<String>,
}

/// Path parameters identifying which report data a request is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportScope {
    pub report_name: String,
    pub report_agency: Option<String>,
    pub domain: Option<String>,
}

impl ReportScope {
    pub fn report(report_name: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            report_agency: None,
            domain: None,
        }
    }

    pub fn agency(report_agency: impl Into<String>, report_name: impl Into<String>) -> Self {
        Self {
            report_agency: Some(report_agency.into()),
            ..Self::report(report_name)
        }
    }

    pub fn domain(domain: impl Into<String>, report_name: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::report(report_name)
        }
    }
}

/// Validated, normalized parameters for one report query.
///
/// `limit` always lies in `[1, MAX_LIMIT]` and `page` is always at least 1;
/// every constructor path goes through [`normalize_limit`] and [`normalize_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub report_name: String,
    pub report_agency: Option<String>,
    pub domain: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub before: Option<String>,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub after: Option<String>,
    limit: i64,
    page: i64,
    /// Backing table, selected by the API version.
    pub table: ReportTable,
}

impl QueryParams {
    pub fn new(report_name: impl Into<String>, table: ReportTable) -> Self {
        Self {
            report_name: report_name.into(),
            report_agency: None,
            domain: None,
            before: None,
            after: None,
            limit: DEFAULT_LIMIT,
            page: 1,
            table,
        }
    }

    pub fn from_scope(scope: ReportScope, table: ReportTable) -> Self {
        Self {
            report_agency: scope.report_agency,
            domain: scope.domain,
            ..Self::new(scope.report_name, table)
        }
    }

    pub fn with_agency(mut self, report_agency: impl Into<String>) -> Self {
        self.report_agency = Some(report_agency.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = normalize_limit(Some(limit));
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = normalize_page(Some(page));
        self
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Rows to skip before the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn is_domain_query(&self) -> bool {
        self.domain.is_some()
    }

    /// Domain queries on the download report match `data.page` by substring.
    pub fn matches_page_substring(&self) -> bool {
        self.is_domain_query() && self.report_name == DOWNLOAD_REPORT
    }
}

/// Coerce a requested page size into `[1, MAX_LIMIT]`.
///
/// Missing means [`DEFAULT_LIMIT`]; zero, negative or oversized values collapse to [`MAX_LIMIT`].
pub fn normalize_limit(limit: Option<i64>) -> i64 {
    match limit {
        None => DEFAULT_LIMIT,
        Some(l) if l <= 0 || l > MAX_LIMIT => MAX_LIMIT,
        Some(l) => l,
    }
}

/// Coerce a requested page number to at least 1.
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_to_one_thousand() {
        assert_eq!(normalize_limit(None), 1000);
        assert_eq!(QueryParams::new("site", ReportTable::Current).limit(), 1000);
    }

    #[test]
    fn test_out_of_range_limit_collapses_to_max() {
        for raw in [0, -1, -500, 10_001, 11_000, i64::MAX, i64::MIN] {
            assert_eq!(normalize_limit(Some(raw)), MAX_LIMIT, "limit {raw}");
        }
    }

    #[test]
    fn test_in_range_limit_is_kept() {
        for raw in [1, 3, 999, 1000, 10_000] {
            assert_eq!(normalize_limit(Some(raw)), raw);
        }
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(0)), 1);
        assert_eq!(normalize_page(Some(-7)), 1);
        assert_eq!(normalize_page(Some(4)), 4);
    }

    #[test]
    fn test_offset_from_page_and_limit() {
        let params = QueryParams::new("site", ReportTable::Legacy)
            .with_limit(3)
            .with_page(2);
        assert_eq!(params.offset(), 3);

        let first = QueryParams::new("site", ReportTable::Legacy).with_page(-2);
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_domain_query_classification() {
        let standard = QueryParams::new("download", ReportTable::Current);
        assert!(!standard.is_domain_query());
        assert!(!standard.matches_page_substring());

        let download = QueryParams::new("download", ReportTable::Current).with_domain("test.gov");
        assert!(download.is_domain_query());
        assert!(download.matches_page_substring());

        let site = QueryParams::new("site", ReportTable::Current).with_domain("test.gov");
        assert!(site.is_domain_query());
        assert!(!site.matches_page_substring());
    }

    #[test]
    fn test_from_scope_keeps_path_parameters() {
        let params = QueryParams::from_scope(
            ReportScope::agency("interior", "site"),
            ReportTable::Legacy,
        );
        assert_eq!(params.report_name, "site");
        assert_eq!(params.report_agency.as_deref(), Some("interior"));
        assert_eq!(params.domain, None);
        assert_eq!(params.table, ReportTable::Legacy);
    }
}
