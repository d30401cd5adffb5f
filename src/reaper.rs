// Background removal queue for bundle files
use crate::manager::BundleManager;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Fire-and-forget removal queue.
///
/// Each enqueued job is a set of bundle identifiers; a single spawned worker
/// drains jobs in order and deletes both files per identifier. Removal is
/// idempotent, so overlapping jobs from racing delete requests are safe.
/// Failures are logged and never surfaced to the enqueuing caller.
#[derive(Clone)]
pub struct RemovalQueue {
    tx: mpsc::UnboundedSender<Vec<String>>,
}

impl RemovalQueue {
    /// Spawn the worker task on the current runtime
    pub fn start(manager: Arc<BundleManager>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<String>>();
        tokio::spawn(async move {
            while let Some(batch) = rx.recv().await {
                let manager = Arc::clone(&manager);
                let result =
                    tokio::task::spawn_blocking(move || remove_batch(&manager, batch)).await;
                if let Err(e) = result {
                    log::warn!("Removal task panicked: {}", e);
                }
            }
        });
        Self { tx }
    }

    /// Schedule one removal job. Returns immediately; an empty set still
    /// schedules a (trivial) job so bulk deletes always enqueue exactly one.
    pub fn enqueue(&self, uuids: Vec<String>) {
        log::debug!("Scheduling removal of {} bundle(s)", uuids.len());
        // send only fails when the worker is gone, i.e. at shutdown
        let _ = self.tx.send(uuids);
    }
}

fn remove_batch(manager: &BundleManager, uuids: Vec<String>) {
    for uuid in uuids {
        if let Err(e) = manager.remove_bundle(&uuid) {
            log::warn!("Failed to remove bundle {}: {:#}", uuid, e);
        }
    }
}
