use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use stripo_backend::config::{data_dir_from_env, AppConfig};
use stripo_backend::domain::SystemClock;
use stripo_backend::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = data_dir_from_env();
    info!("Using data directory {:?}", data_dir);
    let config = AppConfig::load_or_create(&data_dir)?;

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind_address '{}'", config.bind_address))?;

    let app_state = initialize_backend(&data_dir, config, Arc::new(SystemClock)).await?;
    let app = create_router(app_state)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
