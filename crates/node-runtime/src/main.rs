//! # Roster Directory Node
//!
//! Serves the membership directory over HTTP.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (filter from `RD_LOG`, default `info`)
//! 2. Load configuration from the environment and validate it
//! 3. Open the record store and wire the services
//! 4. Start the expiry sweeper
//! 5. Bind the HTTP listener and serve until Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::container::{NodeConfig, ServiceContainer};

/// The node runtime: wired services plus the shutdown channel.
pub struct NodeRuntime {
    container: Arc<ServiceContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Create a runtime from validated configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating Roster directory runtime");

        let container =
            Arc::new(ServiceContainer::new(config).context("Failed to initialize services")?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start background tasks and the HTTP listener.
    pub async fn start(&self) -> Result<()> {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Roster Directory v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let sweeper = self.container.sweeper();
        let sweeper_shutdown = self.shutdown_rx.clone();
        tokio::spawn(sweeper.run(sweeper_shutdown));
        info!(
            retention_secs = config.expiry.retention.as_secs(),
            interval_secs = config.expiry.interval.as_secs(),
            "Expiry sweeper started"
        );

        let addr = SocketAddr::new(config.http.bind_addr, config.http.port);
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let router = self.container.router();
        let mut http_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = rd_03_directory_api::serve(listener, router) => {
                    if let Err(e) = result {
                        error!(error = %e, "HTTP server failed");
                    }
                }
                _ = http_shutdown.changed() => {
                    info!("[http] Shutdown signal received");
                }
            }
        });

        info!(addr = %addr, "HTTP port");
        info!(backend = ?config.storage.backend, data_dir = ?config.storage.data_dir, "Storage");

        Ok(())
    }

    /// Signal every task to stop and give them a moment to finish.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        tokio::time::sleep(Duration::from_millis(500)).await;

        info!("Shutdown complete");
    }
}

/// Load configuration from the environment.
fn load_config() -> Result<NodeConfig> {
    let config = NodeConfig::from_env();
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("RD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;

    let runtime = NodeRuntime::new(config)?;
    runtime.start().await?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
