use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cyclonedx_bom_repo_server::api::{app, AppState};
use cyclonedx_bom_repo_server::config::ServerConfig;
use cyclonedx_bom_repo_storage::{MetadataService, Repository, RepositoryConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!(?config, "Starting the BOM repository server.");

    let repository = Repository::open(RepositoryConfig {
        directory: config.directory.clone(),
    })
    .with_context(|| format!("Failed to open the repository at {}", config.directory.display()))?;

    let metadata = Arc::new(MetadataService::start(
        repository.clone(),
        config.retention_policy(),
        Duration::from_secs(config.sweep_interval_seconds),
    ));

    let state = AppState {
        repository,
        metadata: Arc::clone(&metadata),
        allowed_methods: config.allowed_methods(),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, allow = %config.allowed_methods().allow_header(), "Listening for requests.");
    axum::Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind {}", addr))?
        .serve(app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match Arc::try_unwrap(metadata) {
        Ok(metadata) => metadata.shutdown().await,
        Err(_) => warn!(
            "Metadata service still shared at shutdown; the retention sweeper stops with the process."
        ),
    }
    info!("Shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install the Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install the SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received.");
}
