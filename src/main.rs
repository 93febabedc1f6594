use logo_studio_api::{app, config, database::DatabaseManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Logo Studio API in {:?} mode", config.environment);

    // Allow tests or deployments to override port via env
    let port = std::env::var("LOGO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Logo Studio API listening on http://{}", bind_addr);

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
