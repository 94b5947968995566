pub mod api;
pub mod change;
pub mod core;
pub mod loader;
pub mod providers;

#[cfg(test)]
mod test_support;

use crate::core::Cache;
use crate::core::config::AppConfig;
use crate::loader::RateLoader;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::{debug, error, info};

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Wires the upstream client, the shared cache and the router together.
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let provider =
        providers::NbrbProvider::new(&config.provider.base_url, config.provider.timeout())?;
    let rate_cache = Arc::new(Cache::new());
    let loader = RateLoader::new(Arc::new(provider), rate_cache);

    Ok(api::router(api::AppState::new(loader)))
}

pub async fn serve(config: AppConfig) -> Result<()> {
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(
        addr = %listener.local_addr()?,
        upstream = %config.provider.base_url,
        "Rates service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    info!("Shutdown signal received, gracefully stopping");
}
