pub mod config;
pub mod error;
pub mod http;

use std::sync::Arc;

use stockflow_core::storage::manager::StockStore;
use tokio::net::TcpListener;

use config::ServerConfig;
use error::ServerError;
use http::{create_router, AppState};

/// Serve the API on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    store: Arc<dyn StockStore>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(AppState::new(store));
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Server listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Serve the API on an already-bound listener until the process is stopped.
pub async fn serve(listener: TcpListener, store: Arc<dyn StockStore>) -> Result<(), ServerError> {
    serve_with_shutdown(listener, store, std::future::pending()).await
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run(config: &ServerConfig, store: Arc<dyn StockStore>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    tracing::info!("Registering routes:");
    tracing::info!("  GET  /api/stocks");
    tracing::info!("  POST /api/stocks");
    tracing::info!("  GET  /health");

    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, store, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
