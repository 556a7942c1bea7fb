//! worldmem-server - worldmem REST facade
//!
//! Per-world memory API in front of the knowledge engine sidecar.

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use worldmem_core::{HttpEngine, MemoryService};

mod config;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("worldmem_server=info".parse()?)
                .add_directive("worldmem_core=info".parse()?),
        )
        .init();

    info!("worldmem-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load()?;
    info!(engine_url = %config.engine_url, "Config loaded");

    // One engine client, one orchestration service, shared by every handler.
    let engine = HttpEngine::with_timeout(config.engine_url.clone(), config.engine_timeout())?;
    let memory = MemoryService::initialize(Arc::new(engine), config.service_config()).await;
    if !memory.is_ready() {
        warn!("Serving degraded: tenant operations will return 503 until restart");
    }

    let bind_addr = config.bind_addr.clone();
    let state = state::AppState::new(config, memory);
    let router = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
