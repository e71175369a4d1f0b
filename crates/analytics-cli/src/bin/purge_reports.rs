use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};

use analytics_core::models::ReportTable;
use analytics_core::Config;
use analytics_db::{create_pool, retention_cutoff, PostgresRetentionRepository};
use analytics_worker::purge_tables;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableArg {
    Legacy,
    Current,
    All,
}

impl TableArg {
    fn tables(self) -> Vec<ReportTable> {
        match self {
            TableArg::Legacy => vec![ReportTable::Legacy],
            TableArg::Current => vec![ReportTable::Current],
            TableArg::All => ReportTable::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "purge_reports")]
#[command(about = "Delete report rows older than the retention window")]
struct Args {
    /// Months of data to keep (default: RETENTION_MONTHS)
    #[arg(long)]
    months: Option<u32>,

    /// Table to purge
    #[arg(long, value_enum, default_value = "all")]
    table: TableArg,

    /// Print the cutoff date without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let months = args.months.unwrap_or_else(|| config.retention_months());
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let cutoff = retention_cutoff(Utc::now().date_naive(), months);
    let tables = args.table.tables();
    let names: Vec<&str> = tables.iter().map(ReportTable::table_name).collect();

    if args.dry_run {
        println!(
            "Would delete rows dated on or before {} from {}",
            cutoff,
            names.join(", ")
        );
        return Ok(());
    }

    let pool = create_pool(&config).await?;
    let repository = PostgresRetentionRepository::new(pool.clone());

    let result = purge_tables(&repository, &tables, cutoff).await;
    pool.close().await;

    let deleted = result.context("Failed to purge report data")?;
    tracing::info!(cutoff = %cutoff, tables = ?names, deleted, "Purge complete");
    println!("Deleted {} rows dated on or before {}", deleted, cutoff);

    Ok(())
}
