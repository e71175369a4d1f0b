use analytics_core::models::{AnalyticsRecord, QueryParams};
use analytics_core::AppError;
use sqlx::{PgPool, Postgres};

/// Trait for report read operations
/// This abstracts the database implementation (PostgreSQL)
#[async_trait::async_trait]
pub trait ReportRepositoryTrait: Send + Sync {
    /// Filtered, ordered page of records from the table selected by `params.table`.
    async fn query_reports(&self, params: &QueryParams) -> Result<Vec<AnalyticsRecord>, AppError>;
}

/// A value bound to one `$n` placeholder of a [`ReportQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Text(String),
    Int(i64),
}

/// SQL text plus its arguments, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub sql: String,
    pub args: Vec<QueryArg>,
}

/// Build the read query for `params`.
///
/// - `report_name` always filters.
/// - Standard queries match `report_agency` exactly, or `IS NULL` when no agency is given.
/// - Domain queries ignore the agency; `download` matches `data.page` by substring,
///   every other report matches `data.domain` exactly.
/// - Date bounds are inclusive and compared as calendar dates, so a `TIMESTAMPTZ` row at
///   15:00 on the `before` day is still returned.
pub fn build_report_query(params: &QueryParams) -> ReportQuery {
    let mut sql = format!(
        r#"SELECT id, report_name, report_agency, "date"::date AS "date", data, created_at, updated_at
FROM {}
WHERE report_name = $1"#,
        params.table.table_name()
    );

    let mut args = vec![QueryArg::Text(params.report_name.clone())];
    let mut conditions = Vec::new();
    let mut param_count = 2;

    match &params.domain {
        Some(domain) => {
            if params.matches_page_substring() {
                conditions.push(format!("AND strpos(data->>'page', ${}) > 0", param_count));
            } else {
                conditions.push(format!("AND data->>'domain' = ${}", param_count));
            }
            args.push(QueryArg::Text(domain.clone()));
            param_count += 1;
        }
        None => match &params.report_agency {
            Some(agency) => {
                conditions.push(format!("AND report_agency = ${}", param_count));
                args.push(QueryArg::Text(agency.clone()));
                param_count += 1;
            }
            None => conditions.push("AND report_agency IS NULL".to_string()),
        },
    }

    if let Some(before) = &params.before {
        // Whole calendar day, so timestamps later on `before` still match.
        conditions.push(format!(r#"AND "date" < ${}::date + 1"#, param_count));
        args.push(QueryArg::Text(before.clone()));
        param_count += 1;
    }

    if let Some(after) = &params.after {
        conditions.push(format!(r#"AND "date" >= ${}::date"#, param_count));
        args.push(QueryArg::Text(after.clone()));
        param_count += 1;
    }

    for condition in conditions {
        sql.push('\n');
        sql.push_str(&condition);
    }

    sql.push_str("\nORDER BY \"date\" DESC NULLS LAST, id ASC");
    sql.push_str(&format!("\nLIMIT ${} OFFSET ${}", param_count, param_count + 1));
    args.push(QueryArg::Int(params.limit()));
    args.push(QueryArg::Int(params.offset()));

    ReportQuery { sql, args }
}

#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReportRepositoryTrait for PostgresReportRepository {
    #[tracing::instrument(skip(self, params), fields(
        db.system = "postgresql",
        db.table = %params.table,
        db.operation = "select",
        report_name = %params.report_name,
        domain_query = params.is_domain_query(),
        limit = params.limit(),
        page = params.page()
    ))]
    async fn query_reports(&self, params: &QueryParams) -> Result<Vec<AnalyticsRecord>, AppError> {
        let ReportQuery { sql, args } = build_report_query(params);

        // Bind parameters in the same order they were added
        let mut query = sqlx::query_as::<Postgres, AnalyticsRecord>(&sql);
        for arg in args {
            query = match arg {
                QueryArg::Text(value) => query.bind(value),
                QueryArg::Int(value) => query.bind(value),
            };
        }

        let records = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to query report data");
            AppError::from(e)
        })?;

        tracing::debug!(rows = records.len(), "Report query completed");
        Ok(records)
    }
}
