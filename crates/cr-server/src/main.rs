use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cr_server::{app, AppState, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("cr_server=info,cr_llm=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(cli.provider_config());
    if config.api_key.is_none() {
        tracing::warn!("No provider API key configured; analysis requests will fail until one is set");
    }
    tracing::info!(
        api_key_loaded = config.api_key.is_some(),
        model = %config.model,
        base_url = %config.base_url,
        "provider configured"
    );

    let origins = cli.allowed_origins()?;
    let state = AppState::from_config(config)?;
    let app = app(state, origins);

    let listener = tokio::net::TcpListener::bind(&cli.listen_addr).await?;
    tracing::info!("Starting HTTP server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
