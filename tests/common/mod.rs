use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use supportbundle::{BundleConfig, BundleManager, UploadNotifier, constants};

pub fn setup_temp_dir() -> Result<TempDir> {
    tempfile::tempdir().map_err(anyhow::Error::from)
}

pub fn setup_manager(dir: &Path) -> Result<BundleManager> {
    BundleManager::new(dir.to_path_buf())
}

/// Write a placeholder archive file for a bundle identifier
#[allow(dead_code)]
pub fn touch_archive(dir: &Path, uuid: &str) -> Result<()> {
    let mut file = File::create(constants::archive_path(dir, uuid))?;
    file.write_all(b"bundle payload")?;
    Ok(())
}

/// Write a done marker for a bundle identifier
#[allow(dead_code)]
pub fn touch_marker(dir: &Path, uuid: &str) -> Result<()> {
    File::create(constants::marker_path(dir, uuid))?;
    Ok(())
}

/// Notifier that records every config it was called with
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub calls: Mutex<Vec<BundleConfig>>,
}

impl RecordingNotifier {
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl UploadNotifier for RecordingNotifier {
    fn notify_upload(&self, config: &BundleConfig) -> Result<()> {
        self.calls.lock().unwrap().push(config.clone());
        Ok(())
    }
}

/// Notifier that always fails
#[allow(dead_code)]
pub struct FailingNotifier;

impl UploadNotifier for FailingNotifier {
    fn notify_upload(&self, _config: &BundleConfig) -> Result<()> {
        anyhow::bail!("notification endpoint unreachable")
    }
}

#[cfg(feature = "server")]
#[allow(dead_code)]
pub async fn start_test_server(
    manager: Arc<BundleManager>,
    port: u16,
) -> Result<tokio::task::JoinHandle<()>> {
    let config = supportbundle::server::ServerConfig {
        version: "test".to_string(),
    };
    let server = supportbundle::server::Server::new(manager, config);
    let app = server.router();
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(server_handle)
}

#[cfg(not(feature = "server"))]
#[allow(dead_code)]
pub async fn start_test_server(
    _manager: Arc<BundleManager>,
    _port: u16,
) -> Result<tokio::task::JoinHandle<()>> {
    anyhow::bail!("server feature not enabled for tests");
}
