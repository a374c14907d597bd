mod domain;
mod clients;
mod http;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use tokio::net::TcpListener;
use tracing::{error, info};
use crate::app_system::{AppError, CatalogSystem, ServerConfig, setup_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    info!(?config, "Starting catalog service");

    // Start the catalog store; the router gets its own client handle
    let system = CatalogSystem::new(config.store_channel_capacity);
    let metrics = http::HttpMetrics::new()?;
    let app = http::build_app_router(system.product_client.clone(), metrics, &config)?;

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its client) is gone once serve returns
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
