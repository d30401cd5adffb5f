// HTTP handlers module

mod handle_bundles;
mod handle_root;
mod handle_status;

use crate::manager::BundleManager;
use crate::reaper::RemovalQueue;
use crate::server::config::ServerConfig;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct ServerState {
    pub manager: Arc<BundleManager>,
    pub removals: RemovalQueue,
    pub config: ServerConfig,
    pub start_time: Instant,
}

pub use handle_bundles::*;
pub use handle_root::*;
pub use handle_status::*;
