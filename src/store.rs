// Storage directory handle for bundle files
use crate::constants;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Explicit handle to the bundle storage directory.
///
/// Every filesystem access for bundle files goes through this type; path
/// construction itself is delegated to `constants` so the naming convention
/// lives in one place.
#[derive(Debug, Clone)]
pub struct BundleStore {
    directory: PathBuf,
}

impl BundleStore {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn archive_path(&self, uuid: &str) -> PathBuf {
        constants::archive_path(&self.directory, uuid)
    }

    pub fn marker_path(&self, uuid: &str) -> PathBuf {
        constants::marker_path(&self.directory, uuid)
    }

    /// Filenames currently present in the storage directory
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.directory)
            .with_context(|| format!("Failed to read directory: {}", self.directory.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    pub fn has_archive(&self, uuid: &str) -> bool {
        self.archive_path(uuid).is_file()
    }

    pub fn has_marker(&self, uuid: &str) -> bool {
        self.marker_path(uuid).is_file()
    }

    /// Open a bundle archive for reading
    pub fn open_archive(&self, uuid: &str) -> Result<File> {
        let path = self.archive_path(uuid);
        if !path.is_file() {
            anyhow::bail!("Bundle {} not found", uuid);
        }
        File::open(&path).with_context(|| format!("Failed to open archive: {}", path.display()))
    }

    /// Create the done marker for a bundle. Idempotent: an existing marker
    /// is left in place without error.
    pub fn write_marker(&self, uuid: &str) -> Result<()> {
        let path = self.marker_path(uuid);
        File::create(&path)
            .with_context(|| format!("Failed to write marker: {}", path.display()))?;
        Ok(())
    }

    /// Remove both files of a bundle. Idempotent: an already-absent file is
    /// success, so overlapping removal jobs can race safely.
    pub fn remove_bundle(&self, uuid: &str) -> Result<()> {
        for path in [self.archive_path(uuid), self.marker_path(uuid)] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove: {}", path.display()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store() -> (tempfile::TempDir, BundleStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BundleStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_open_archive_not_found() {
        let (_dir, store) = store();
        let err = store.open_archive("missing").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_marker_write_is_idempotent() {
        let (_dir, store) = store();
        let uuid = "e".repeat(32);
        store.write_marker(&uuid).unwrap();
        assert!(store.has_marker(&uuid));
        store.write_marker(&uuid).unwrap();
        assert!(store.has_marker(&uuid));
    }

    #[test]
    fn test_remove_bundle_is_idempotent() {
        let (_dir, store) = store();
        let uuid = "f".repeat(32);
        let mut archive = File::create(store.archive_path(&uuid)).unwrap();
        archive.write_all(b"payload").unwrap();
        store.write_marker(&uuid).unwrap();

        store.remove_bundle(&uuid).unwrap();
        assert!(!store.has_archive(&uuid));
        assert!(!store.has_marker(&uuid));

        // nothing left to remove, still success
        store.remove_bundle(&uuid).unwrap();
    }

    #[test]
    fn test_list_returns_filenames() {
        let (_dir, store) = store();
        let uuid = "a".repeat(32);
        File::create(store.archive_path(&uuid)).unwrap();
        let names = store.list().unwrap();
        assert_eq!(names, vec![format!("{}.tar.gz", uuid)]);
    }
}
