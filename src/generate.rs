// Bundle config and archive generation
use crate::constants;
use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Identifying fields embedded in each bundle, serialized verbatim as
/// `config.json` inside the archive. Immutable once the bundle exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Assigned at creation time; absent on incoming create requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_uuid: Option<String>,
    #[serde(default)]
    pub install_uuid: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub instance_uuid: String,
}

/// Materializes a bundle archive at a destination path.
///
/// Seam for the data-generation collaborator; the controller only depends on
/// this trait so tests can substitute a recorder or a failing generator.
pub trait ArchiveGenerator: Send + Sync {
    fn generate(&self, dest: &Path, config: &BundleConfig) -> Result<()>;
}

/// Default generator: a gzip-compressed tar holding the serialized config
pub struct TarGzGenerator;

impl ArchiveGenerator for TarGzGenerator {
    fn generate(&self, dest: &Path, config: &BundleConfig) -> Result<()> {
        let file = File::create(dest)
            .with_context(|| format!("Failed to create archive: {}", dest.display()))?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let data = serde_json::to_vec_pretty(config).context("Failed to serialize config")?;
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(chrono::Utc::now().timestamp().max(0) as u64);
        header.set_cksum();
        builder
            .append_data(&mut header, constants::CONFIG_FILENAME, data.as_slice())
            .context("Failed to append config entry")?;

        let encoder = builder.into_inner().context("Failed to finish archive")?;
        encoder.finish().context("Failed to flush archive")?;
        Ok(())
    }
}
