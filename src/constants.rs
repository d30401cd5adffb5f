//! Global constants and helpers for bundle filenames, paths and identifiers
use std::path::{Path, PathBuf};

/// Binary name used in user agents and log output
pub const BINARY_NAME: &str = "supportbundle";

/// Package version from Cargo.toml (set at compile time)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the user agent string for HTTP requests
pub fn user_agent() -> String {
    format!("{}/{}", BINARY_NAME, VERSION)
}

// ============================================================================
// Bundle File Constants
// ============================================================================

/// Suffix of every bundle archive file
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Suffix appended to an archive path to form its done marker
pub const MARKER_SUFFIX: &str = ".done";

/// Name of the serialized config entry inside each archive
pub const CONFIG_FILENAME: &str = "config.json";

/// Length of a canonical bundle identifier (UUID4 hex, no dashes)
pub const BUNDLE_UUID_LEN: usize = 32;

// ============================================================================
// Network Constants
// ============================================================================

/// Default HTTP server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP server port
pub const DEFAULT_PORT: u16 = 8080;

/// Timeout for upload notification requests
pub const HTTP_NOTIFY_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Path Resolution
// ============================================================================

/// Returns the canonical archive filename for a bundle identifier
pub fn archive_filename(uuid: &str) -> String {
    format!("{}{}", uuid, ARCHIVE_SUFFIX)
}

/// Resolves the on-disk archive path relative to the provided directory
pub fn archive_path(dir: impl AsRef<Path>, uuid: &str) -> PathBuf {
    dir.as_ref().join(archive_filename(uuid))
}

/// Resolves the done-marker path for a bundle: the archive path plus a fixed suffix
pub fn marker_path(dir: impl AsRef<Path>, uuid: &str) -> PathBuf {
    let mut name = archive_filename(uuid);
    name.push_str(MARKER_SUFFIX);
    dir.as_ref().join(name)
}

/// Whether a string is a canonical bundle identifier (32 hex chars)
pub fn is_bundle_uuid(s: &str) -> bool {
    s.len() == BUNDLE_UUID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_user_agent() {
        let ua = user_agent();
        assert!(ua.starts_with("supportbundle/"));
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(archive_filename("abc"), "abc.tar.gz");
        let uuid = "0".repeat(32);
        assert_eq!(archive_filename(&uuid), format!("{}.tar.gz", uuid));
    }

    #[test]
    fn test_archive_path() {
        let dir = Path::new("/tmp/bundles");
        assert_eq!(
            archive_path(dir, "abc"),
            Path::new("/tmp/bundles/abc.tar.gz")
        );
    }

    #[test]
    fn test_marker_path_appends_suffix_to_archive_path() {
        let dir = Path::new("/tmp/bundles");
        let archive = archive_path(dir, "abc");
        let marker = marker_path(dir, "abc");
        assert_eq!(
            marker.to_string_lossy(),
            format!("{}{}", archive.to_string_lossy(), MARKER_SUFFIX)
        );
    }

    #[test]
    fn test_is_bundle_uuid() {
        assert!(is_bundle_uuid(&"0".repeat(32)));
        assert!(is_bundle_uuid("0123456789abcdef0123456789abcdef"));
        assert!(!is_bundle_uuid("foo"));
        assert!(!is_bundle_uuid(&"0".repeat(31)));
        assert!(!is_bundle_uuid(&"g".repeat(32)));
    }

    #[test]
    fn test_constants_values() {
        assert_eq!(ARCHIVE_SUFFIX, ".tar.gz");
        assert_eq!(MARKER_SUFFIX, ".done");
        assert_eq!(CONFIG_FILENAME, "config.json");
        assert_eq!(BUNDLE_UUID_LEN, 32);
        assert_eq!(DEFAULT_PORT, 8080);
    }
}
