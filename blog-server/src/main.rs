use blog_server::infrastructure::config::Config;
use blog_server::infrastructure::logging::{init_logging, DEFAULT_LOG_FILTER};
use blog_server::Application;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging(DEFAULT_LOG_FILTER);

    let config = Config::from_env()?;

    tracing::info!("Starting blog server...");
    tracing::info!("HTTP server will listen on {}", config.http_addr());
    tracing::info!("Post store backend: {:?}", config.store_backend);
    tracing::info!("CORS allowed origins: {:?}", config.cors_allowed_origins);

    let application = Application::build(&config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Shutting down...");
    Ok(())
}
