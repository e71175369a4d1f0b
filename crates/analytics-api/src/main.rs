use analytics_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, scheduler, routes)
    let app = analytics_api::setup::initialize_app(config.clone()).await?;

    // Serve until a shutdown signal, then release the pool and scheduler
    analytics_api::setup::server::start_server(&config, app.router.clone()).await?;
    app.shutdown().await;

    Ok(())
}
