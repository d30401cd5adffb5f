// src/manager.rs
use crate::generate::{ArchiveGenerator, BundleConfig, TarGzGenerator};
use crate::index::BundleIndex;
use crate::notify::{NoopNotifier, UploadNotifier};
use crate::state::BundleStatus;
use crate::store::BundleStore;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Lifecycle controller for the bundle storage directory.
///
/// Methods are synchronous and may block on storage or on the generation
/// and notification collaborators; async callers bridge with
/// `spawn_blocking`.
pub struct BundleManager {
    store: BundleStore,
    index: Arc<RwLock<BundleIndex>>,
    generator: Arc<dyn ArchiveGenerator>,
    notifier: Arc<dyn UploadNotifier>,
    stats: Arc<RwLock<ManagerStats>>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ManagerStats {
    pub bundles_created: u64,
    pub bundles_served: u64,
    pub markers_written: u64,
    pub bundles_removed: u64,
}

impl BundleManager {
    pub fn new(directory: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create directory: {}", directory.display()))?;
        let store = BundleStore::new(directory);
        let index = BundleIndex::from_listing(store.list()?);

        Ok(Self {
            store,
            index: Arc::new(RwLock::new(index)),
            generator: Arc::new(TarGzGenerator),
            notifier: Arc::new(NoopNotifier),
            stats: Arc::new(RwLock::new(ManagerStats::default())),
        })
    }

    pub fn with_generator(mut self, generator: Arc<dyn ArchiveGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn UploadNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &BundleStore {
        &self.store
    }

    pub fn directory(&self) -> &std::path::Path {
        self.store.directory()
    }

    /// Rebuild the index from the live directory listing.
    ///
    /// The write path keeps the index current for everything this process
    /// does; reconciliation repairs out-of-band drift, which is also the
    /// only way a bundle can become purge-classified.
    pub fn reconcile(&self) -> Result<()> {
        let rebuilt = BundleIndex::from_listing(self.store.list()?);
        let mut index = self.index.write().unwrap();
        if rebuilt.len() != index.len() {
            log::debug!(
                "Index reconciled: {} -> {} bundles",
                index.len(),
                rebuilt.len()
            );
        }
        *index = rebuilt;
        Ok(())
    }

    /// Open a bundle archive, optionally marking the bundle as handed off.
    ///
    /// Marker creation is idempotent and is the only pending -> done
    /// transition in the system.
    pub fn open_bundle(&self, uuid: &str, mark_done: bool) -> Result<File> {
        if !self.store.has_archive(uuid) {
            anyhow::bail!("Bundle {} not found", uuid);
        }
        if mark_done {
            self.store.write_marker(uuid)?;
            self.index.write().unwrap().record_processed(uuid);
            self.stats.write().unwrap().markers_written += 1;
        }
        let file = self.store.open_archive(uuid)?;
        self.stats.write().unwrap().bundles_served += 1;
        Ok(file)
    }

    /// All known bundles with their processed flag
    pub fn list_bundles(&self) -> Result<Vec<BundleStatus>> {
        self.reconcile()?;
        Ok(self.index.read().unwrap().statuses())
    }

    /// Create a new bundle: assign a fresh identifier, materialize the
    /// archive, and (unless `process` is false) notify the downstream
    /// consumer exactly once. Notification failure propagates; the archive
    /// stays on storage as pending and a retried create gets a new
    /// identifier.
    pub fn create_bundle(&self, mut config: BundleConfig, process: bool) -> Result<BundleConfig> {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        config.bundle_uuid = Some(uuid.clone());

        let dest = self.store.archive_path(&uuid);
        self.generator
            .generate(&dest, &config)
            .with_context(|| format!("Failed to generate bundle {}", uuid))?;

        self.index.write().unwrap().record_created(&uuid);
        self.stats.write().unwrap().bundles_created += 1;
        log::info!("Created bundle {}", uuid);

        if process {
            self.notifier
                .notify_upload(&config)
                .with_context(|| format!("Failed to notify upload of bundle {}", uuid))?;
        }

        Ok(config)
    }

    /// Identifiers eligible for bulk removal (orphaned markers)
    pub fn purge_targets(&self) -> Result<Vec<String>> {
        self.reconcile()?;
        Ok(self.index.read().unwrap().purge_set())
    }

    /// Validate a single-bundle delete request. The archive file must
    /// exist; the bundle's classified state is irrelevant.
    pub fn delete_target(&self, uuid: &str) -> Result<Vec<String>> {
        if !self.store.has_archive(uuid) {
            anyhow::bail!("Bundle {} not found", uuid);
        }
        Ok(vec![uuid.to_string()])
    }

    /// Remove both files of a bundle and drop its index record. Idempotent.
    pub fn remove_bundle(&self, uuid: &str) -> Result<()> {
        self.store.remove_bundle(uuid)?;
        self.index.write().unwrap().remove(uuid);
        self.stats.write().unwrap().bundles_removed += 1;
        log::debug!("Removed bundle {}", uuid);
        Ok(())
    }

    /// Counts of indexed bundles per state as (pending, done, purge)
    pub fn state_counts(&self) -> (usize, usize, usize) {
        let index = self.index.read().unwrap();
        (
            index.count(crate::index::BundleState::Pending),
            index.count(crate::index::BundleState::Done),
            index.count(crate::index::BundleState::Purge),
        )
    }

    pub fn get_stats(&self) -> ManagerStats {
        self.stats.read().unwrap().clone()
    }
}
