use analytics_core::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing.
///
/// `RUST_LOG` wins when set; otherwise `log_level` applies to this workspace's crates and
/// to `tower_http`, with everything else at `warn`.
pub fn init_telemetry(
    log_level: &str,
    log_format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!(
            "warn,analytics_api={level},analytics_db={level},analytics_worker={level},tower_http={level}",
            level = log_level
        ))
    })?;

    match log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
                .try_init()?;
        }
        LogFormat::Compact => {
            let console_fmt = tracing_subscriber::fmt::layer()
                .event_format(Format::default().compact().with_target(false));
            tracing_subscriber::registry()
                .with(filter)
                .with(console_fmt)
                .try_init()?;
        }
    }

    tracing::info!(log_level, ?log_format, "Tracing initialized");
    Ok(())
}
