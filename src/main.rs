use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mms_web::{app, cli::Cli, config, is_development, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so BASE_API_URL and friends apply to cargo run
    let _ = dotenvy::dotenv();

    let default_filter = if is_development!() { "mms_web=debug,tower_http=debug" } else { "mms_web=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(config::config().clone());
    tracing::info!("Starting mms-web in {:?} mode, backend at {}", config.environment, config.api.base_url);

    let bind_addr = config.bind_addr();
    let state = AppState::new(config).context("failed to build backend client")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
