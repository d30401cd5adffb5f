// Bundle lifecycle handlers

use crate::constants;
use crate::generate::BundleConfig;
use crate::server::ServerState;
use crate::server::error::{internal_error, is_not_found_error, not_found, task_join_error};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

fn download_headers(content_type: &'static str, filename: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static(content_type));
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
    {
        headers.insert("Content-Disposition", value);
    }
    headers
}

#[derive(Deserialize)]
pub struct FetchParams {
    /// Write the done marker before serving the archive
    #[serde(default)]
    pub done: bool,
}

pub async fn handle_fetch_bundle(
    State(state): State<ServerState>,
    Path(uuid): Path<String>,
    Query(params): Query<FetchParams>,
) -> impl IntoResponse {
    // open_bundle touches storage, so run it off the async worker
    let file_result = tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        let uuid = uuid.clone();
        move || manager.open_bundle(&uuid, params.done)
    })
    .await;

    match file_result {
        Ok(Ok(std_file)) => {
            let file = tokio::fs::File::from_std(std_file);
            let stream = ReaderStream::new(file);
            let body = Body::from_stream(stream);

            let headers =
                download_headers("application/gzip", &constants::archive_filename(&uuid));

            (StatusCode::OK, headers, body).into_response()
        }
        Ok(Err(e)) => {
            if is_not_found_error(&e) {
                not_found("Bundle not found").into_response()
            } else {
                internal_error(&e.to_string()).into_response()
            }
        }
        Err(e) => task_join_error(e).into_response(),
    }
}

pub async fn handle_list_bundles(State(state): State<ServerState>) -> impl IntoResponse {
    match tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        move || manager.list_bundles()
    })
    .await
    {
        Ok(Ok(statuses)) => (StatusCode::OK, axum::Json(statuses)).into_response(),
        Ok(Err(e)) => internal_error(&e.to_string()).into_response(),
        Err(e) => task_join_error(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct CreateParams {
    /// Notify the downstream consumer after creation
    #[serde(default = "default_process")]
    pub process: bool,
}

fn default_process() -> bool {
    true
}

pub async fn handle_create_bundle(
    State(state): State<ServerState>,
    Query(params): Query<CreateParams>,
    axum::Json(config): axum::Json<BundleConfig>,
) -> impl IntoResponse {
    match tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        move || manager.create_bundle(config, params.process)
    })
    .await
    {
        Ok(Ok(created)) => (StatusCode::OK, axum::Json(created)).into_response(),
        Ok(Err(e)) => internal_error(&format!("{:#}", e)).into_response(),
        Err(e) => task_join_error(e).into_response(),
    }
}

/// Bulk delete: schedule removal of every purge-classified bundle. Always
/// schedules exactly one job, even when the purge set is empty.
pub async fn handle_delete_bundles(State(state): State<ServerState>) -> impl IntoResponse {
    match tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        move || manager.purge_targets()
    })
    .await
    {
        Ok(Ok(targets)) => {
            let scheduled = targets.len();
            state.removals.enqueue(targets);
            (StatusCode::OK, axum::Json(json!({"scheduled": scheduled}))).into_response()
        }
        Ok(Err(e)) => internal_error(&e.to_string()).into_response(),
        Err(e) => task_join_error(e).into_response(),
    }
}

/// Single delete: 404 unless the archive exists, otherwise schedule removal
/// of exactly this bundle regardless of its classified state.
pub async fn handle_delete_bundle(
    State(state): State<ServerState>,
    Path(uuid): Path<String>,
) -> impl IntoResponse {
    match tokio::task::spawn_blocking({
        let manager = Arc::clone(&state.manager);
        move || manager.delete_target(&uuid)
    })
    .await
    {
        Ok(Ok(targets)) => {
            state.removals.enqueue(targets);
            (StatusCode::OK, axum::Json(json!({"scheduled": 1}))).into_response()
        }
        Ok(Err(e)) => {
            if is_not_found_error(&e) {
                not_found("Bundle not found").into_response()
            } else {
                internal_error(&e.to_string()).into_response()
            }
        }
        Err(e) => task_join_error(e).into_response(),
    }
}
