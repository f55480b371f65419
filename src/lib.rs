pub mod app_config;
pub mod config;
pub mod cosmic;
pub mod design;
pub mod server;
pub mod shell;

use crate::app_config::AppConfig;
use crate::cosmic::{CosmicClient, DesignFetcher};
use crate::server::AppState;
use crate::shell::ShellRegistry;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How often stale page sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config_path = AppConfig::config_path();
    let config = AppConfig::load(&config_path);

    let client = CosmicClient::from_config(&config.cosmic)
        .context("cannot build the Cosmic client; set COSMIC_BUCKET_SLUG or cosmic.bucket_slug")?;
    tracing::info!(
        bucket = %client.bucket_slug(),
        api = %config.cosmic.api_base_url(),
        "content source ready"
    );

    let registry = Arc::new(ShellRegistry::new(config.presentation.session_ttl()));
    let sweeper = registry.spawn_sweeper(SWEEP_INTERVAL);

    let state = AppState {
        fetcher: DesignFetcher::new(Arc::new(client)),
        registry,
        dev_mode: config.presentation.resolve_dev_mode(),
        tick_interval: config.presentation.tick_interval(),
    };

    let addr = config.socket_addr();
    let (bound, server) = warp::serve(server::routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("serving on http://{}", bound);
    server.await;
    sweeper.abort();
    Ok(())
}
