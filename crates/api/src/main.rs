//! Skoo - study-planning backend
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use skoo_api::utils::logging::init_logging;
use skoo_api::{router, AppContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before logging so RUST_LOG and SKOO_LOG_FORMAT apply
    let dotenv = dotenvy::dotenv();
    init_logging();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let config = skoo_infra::config::load().context("failed to load configuration")?;
    let address = config.server.bind_address();

    let ctx = AppContext::new_with_config(config)
        .await
        .context("failed to initialise application context")?;

    let listener =
        TcpListener::bind(&address).await.with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "skoo listening");

    axum::serve(listener, router(Arc::new(ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("skoo stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
