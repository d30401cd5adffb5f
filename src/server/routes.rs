// Route setup and configuration

use crate::manager::BundleManager;
use crate::reaper::RemovalQueue;
use crate::server::ServerState;
use crate::server::config::ServerConfig;
use crate::server::handlers::{
    handle_create_bundle, handle_delete_bundle, handle_delete_bundles, handle_fetch_bundle,
    handle_list_bundles, handle_root, handle_status,
};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn create_router(
    manager: Arc<BundleManager>,
    removals: RemovalQueue,
    config: ServerConfig,
    start_time: Instant,
) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route(
            "/bundles",
            get(handle_list_bundles)
                .post(handle_create_bundle)
                .delete(handle_delete_bundles),
        )
        .route(
            "/bundles/{uuid}",
            get(handle_fetch_bundle).delete(handle_delete_bundle),
        )
        .route("/status", get(handle_status))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(ServerState {
            manager,
            removals,
            config,
            start_time,
        })
}
