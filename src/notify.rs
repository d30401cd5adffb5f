// Upload notification for newly created bundles
use crate::constants;
use crate::generate::BundleConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Signals a downstream consumer that a new bundle is ready.
///
/// Called at most once per `create_bundle` and never retried; failures
/// propagate to the creating caller while the bundle stays on storage.
pub trait UploadNotifier: Send + Sync {
    fn notify_upload(&self, config: &BundleConfig) -> Result<()>;
}

/// POSTs the bundle config as JSON to a notification endpoint
pub struct HttpNotifier {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(constants::HTTP_NOTIFY_TIMEOUT_SECS))
                .user_agent(constants::user_agent())
                .build()?,
            endpoint: endpoint.into(),
        })
    }
}

impl UploadNotifier for HttpNotifier {
    fn notify_upload(&self, config: &BundleConfig) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(config)
            .send()
            .with_context(|| format!("Upload notification failed: {}", self.endpoint))?;
        response
            .error_for_status()
            .with_context(|| format!("Upload notification rejected: {}", self.endpoint))?;
        Ok(())
    }
}

/// No-op notifier for deployments without a downstream consumer
pub struct NoopNotifier;

impl UploadNotifier for NoopNotifier {
    fn notify_upload(&self, config: &BundleConfig) -> Result<()> {
        log::debug!(
            "No notification endpoint configured, skipping upload notification for {}",
            config.bundle_uuid.as_deref().unwrap_or("<unassigned>")
        );
        Ok(())
    }
}
