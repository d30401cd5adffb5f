// HTTP server exposing the bundle lifecycle API

mod config;
mod error;
mod handlers;
mod routes;
mod startup;

use crate::manager::BundleManager;
use crate::reaper::RemovalQueue;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

pub use config::ServerConfig;
pub use handlers::ServerState;
pub use routes::create_router;
pub use startup::{StartupConfig, start_server};

pub struct Server {
    manager: Arc<BundleManager>,
    removals: RemovalQueue,
    config: ServerConfig,
    start_time: Instant,
}

impl Server {
    /// Build a server and spawn its removal worker. Must be called from
    /// within a tokio runtime.
    pub fn new(manager: Arc<BundleManager>, config: ServerConfig) -> Self {
        let removals = RemovalQueue::start(Arc::clone(&manager));
        Self {
            manager,
            removals,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn router(&self) -> Router {
        routes::create_router(
            Arc::clone(&self.manager),
            self.removals.clone(),
            self.config.clone(),
            self.start_time,
        )
    }
}
