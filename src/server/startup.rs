// Server startup and initialization logic

use crate::constants;
use crate::manager::BundleManager;
use crate::notify::{HttpNotifier, NoopNotifier, UploadNotifier};
use crate::server::{Server, ServerConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for server startup
pub struct StartupConfig {
    pub dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub notify_url: Option<String>,
    pub verbose: bool,
}

/// Initialize and configure the BundleManager based on startup config
pub fn initialize_manager(config: &StartupConfig) -> Result<BundleManager> {
    let notifier: Arc<dyn UploadNotifier> = match &config.notify_url {
        Some(url) => {
            if config.verbose {
                log::debug!("Upload notifications go to {}", url);
            }
            Arc::new(HttpNotifier::new(url.clone())?)
        }
        None => {
            if config.verbose {
                log::debug!("No notification endpoint configured");
            }
            Arc::new(NoopNotifier)
        }
    };

    let manager = BundleManager::new(config.dir.clone())
        .with_context(|| format!("Failed to open bundle directory: {}", config.dir.display()))?
        .with_notifier(notifier);

    let (pending, done, purge) = manager.state_counts();
    log::info!(
        "Serving {} ({} pending, {} processed, {} purgeable)",
        config.dir.display(),
        pending,
        done,
        purge
    );

    Ok(manager)
}

/// Start the HTTP server and block until shutdown
pub async fn start_server(config: StartupConfig) -> Result<()> {
    let manager = Arc::new(initialize_manager(&config)?);

    let server = Server::new(
        manager,
        ServerConfig {
            version: constants::VERSION.to_string(),
        },
    );
    let app = server.router();

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("{} server listening on http://{}", constants::BINARY_NAME, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    log::info!("Shutdown signal received");
}
