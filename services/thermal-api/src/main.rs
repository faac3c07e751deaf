//! Thermal frame rendering service.
//!
//! HTTP server that turns 32x24 thermal sensor frames into JPEG images with a
//! temperature legend.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use thermal_api::{build_router, AppState, ServiceConfig};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = ServiceConfig::parse();
    config.validate()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = config.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(async_main(config))
}

async fn async_main(config: ServiceConfig) -> Result<()> {
    let level = config.tracing_level();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(threads) = config.worker_threads {
        info!(worker_threads = threads, "Configured tokio runtime");
    }

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let state = Arc::new(AppState::new(&config, Some(prometheus_handle))?);
    if config.debug_routes {
        info!("Debug routes enabled");
    }
    let app = build_router(state, config.debug_routes);

    let addr = config.listen_addr()?;
    info!(address = %addr, "Starting thermal rendering service");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
