// Root page handler

use crate::constants;
use crate::server::ServerState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

pub async fn handle_root(State(state): State<ServerState>) -> impl IntoResponse {
    let counts = state.manager.state_counts();
    let uptime = state.start_time.elapsed().as_secs();

    let mut response = String::new();
    response.push_str(&format!(
        "{} server v{}\n\n",
        constants::BINARY_NAME,
        state.config.version
    ));
    response.push_str("Support bundle lifecycle API\n");
    response.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    response.push_str(&format!("  Directory:  {}\n", state.manager.directory().display()));
    response.push_str(&format!("  Pending:    {}\n", counts.0));
    response.push_str(&format!("  Processed:  {}\n", counts.1));
    response.push_str(&format!("  Purgeable:  {}\n", counts.2));
    response.push_str(&format!("  Uptime:     {}s\n", uptime));
    response.push('\n');
    response.push_str("Endpoints\n");
    response.push_str("━━━━━━━━━\n");
    response.push_str("  GET    /bundles            list bundles\n");
    response.push_str("  GET    /bundles/{id}?done= fetch archive, optionally mark done\n");
    response.push_str("  POST   /bundles            create a bundle\n");
    response.push_str("  DELETE /bundles            reap orphaned markers\n");
    response.push_str("  DELETE /bundles/{id}       delete one bundle\n");
    response.push_str("  GET    /status             server status\n");

    (StatusCode::OK, response)
}
