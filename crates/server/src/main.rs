use std::sync::Arc;

use stockflow_core::storage::manager::JsonFileStore;
use stockflow_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting StockFlow server");

    let config = ServerConfig::from_env()?;
    let store = JsonFileStore::default_location();
    tracing::info!(path = %store.path().display(), "Using data file");

    stockflow_server::run(&config, Arc::new(store)).await?;
    Ok(())
}
