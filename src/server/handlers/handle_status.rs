// Status handler

use crate::server::ServerState;
use crate::server::error::{internal_error, task_join_error};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

pub async fn handle_status(State(state): State<ServerState>) -> impl IntoResponse {
    // reconcile before reading counts so status reflects the live directory
    let reconciled = tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        move || manager.reconcile()
    })
    .await;
    match reconciled {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return internal_error(&e.to_string()).into_response(),
        Err(e) => return task_join_error(e).into_response(),
    }

    let (pending, done, purge) = state.manager.state_counts();
    let stats = state.manager.get_stats();
    let uptime = state.start_time.elapsed().as_secs();

    let response = json!({
        "server": {
            "version": state.config.version,
            "uptime_seconds": uptime,
            "directory": state.manager.directory().display().to_string(),
        },
        "bundles": {
            "count": pending + done + purge,
            "pending": pending,
            "processed": done + purge,
            "purgeable": purge,
        },
        "stats": stats,
    });

    (StatusCode::OK, axum::Json(response)).into_response()
}
