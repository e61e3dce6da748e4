//! HTTP facade over the enrichment gateway.

pub mod handlers;
pub mod router;

use crate::gateway::EnrichmentGateway;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub use router::build_router;

/// Binds `bind_addr` and serves until the process is interrupted.
pub async fn serve(gateway: Arc<EnrichmentGateway>, bind_addr: &str) -> Result<()> {
    let app = build_router(gateway);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!("stockdesk listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
