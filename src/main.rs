use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dashboard_api::{app, config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    config.validate()?;
    tracing::info!("Starting Dashboard API in {:?} mode", config.environment);

    let state = AppState::from_config(config.clone()).context("failed to initialize token service")?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Dashboard API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;

    Ok(())
}
