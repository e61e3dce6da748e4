pub mod cli;
pub mod core;
pub mod gateway;
pub mod providers;
pub mod server;

use crate::core::catalog::CatalogStore;
use crate::core::config::AppConfig;
use crate::gateway::EnrichmentGateway;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve { bind_addr: Option<String> },
    List,
    Show { ids: Vec<String> },
}

/// Wires the catalog and the analysis provider described by `config`.
pub fn build_gateway(config: &AppConfig) -> Result<EnrichmentGateway> {
    let catalog = match &config.catalog {
        Some(records) => CatalogStore::from_records(records.clone())
            .context("Invalid catalog in configuration")?,
        None => CatalogStore::seeded(),
    };
    debug!(stocks = catalog.len(), "Catalog ready");

    let analysis = &config.providers.analysis;
    let provider = providers::AnalysisProvider::new(&analysis.base_url)
        .context("Failed to build analysis client")?;

    Ok(EnrichmentGateway::new(
        Arc::new(catalog),
        Arc::new(provider),
        analysis.timeout(),
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::resolve(config_path)?;
    debug!("Loaded config: {config:#?}");
    run_with_config(command, config).await
}

/// Runs `command` against an already resolved config.
pub async fn run_with_config(command: AppCommand, config: AppConfig) -> Result<()> {
    let gateway = build_gateway(&config)?;

    match command {
        AppCommand::Serve { bind_addr } => {
            let bind_addr = bind_addr.unwrap_or(config.server.bind_addr);
            info!(
                analysis_url = %config.providers.analysis.base_url,
                deadline = ?gateway.deadline(),
                "stockdesk starting"
            );
            server::serve(Arc::new(gateway), &bind_addr).await
        }
        AppCommand::List => {
            cli::list::run(&gateway.list());
            Ok(())
        }
        AppCommand::Show { ids } => cli::show::run(&gateway, &ids).await,
    }
}
