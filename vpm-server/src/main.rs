//! VPM Server - REST API for visual product search
//!
//! Exposes vpm-core ranking via HTTP endpoints:
//! - POST /upload     - Store a query image (multipart: image)
//! - POST /similarity - Rank the catalog against an image reference
//! - GET  /products   - Full catalog
//! - GET  /health     - Health check

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vpm_server::{create_router_with_config, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vpm_server=info,vpm_core=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialise product store")?;

    let app = create_router_with_config(&config, state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        version = env!("CARGO_PKG_VERSION"),
        "Backend listening (docs at /docs)"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
