// Bundle state derivation from directory listings
use crate::constants;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which file produced a classified directory entry
enum BundleFileKind {
    Archive,
    Marker,
}

/// Result of classifying a directory listing.
///
/// `done` holds every identifier with a marker file, whether or not the
/// archive is still present; `purge` holds the subset whose archive is gone
/// (orphaned markers). `pending` and `done` are disjoint. Lists preserve
/// first-encounter order of the input listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StateBuckets {
    pub pending: Vec<String>,
    pub done: Vec<String>,
    pub purge: Vec<String>,
}

/// One bundle in a listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleStatus {
    pub uuid: String,
    pub processed: bool,
}

/// Parse a bundle filename into its identifier and file kind.
/// Returns None for anything that is not `{32-hex}.tar.gz[.done]`.
fn parse_bundle_filename(name: &str) -> Option<(&str, BundleFileKind)> {
    let (stem, kind) = match name.strip_suffix(constants::MARKER_SUFFIX) {
        Some(stem) => (stem, BundleFileKind::Marker),
        None => (name, BundleFileKind::Archive),
    };
    let uuid = stem.strip_suffix(constants::ARCHIVE_SUFFIX)?;
    if !constants::is_bundle_uuid(uuid) {
        return None;
    }
    Some((uuid, kind))
}

/// Classify a directory listing into pending/done/purge identifier sets.
///
/// Pure over the supplied listing; performs no I/O. Unrecognized filenames
/// are skipped. An empty listing yields three empty buckets.
pub fn classify<I, S>(listing: I) -> StateBuckets
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // (has_archive, has_marker) per identifier, plus first-encounter order
    let mut seen: HashMap<String, (bool, bool)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for name in listing {
        let Some((uuid, kind)) = parse_bundle_filename(name.as_ref()) else {
            continue;
        };
        let entry = seen.entry(uuid.to_string()).or_insert_with(|| {
            order.push(uuid.to_string());
            (false, false)
        });
        match kind {
            BundleFileKind::Archive => entry.0 = true,
            BundleFileKind::Marker => entry.1 = true,
        }
    }

    let mut buckets = StateBuckets::default();
    for uuid in order {
        let (has_archive, has_marker) = seen[&uuid];
        if has_marker {
            if !has_archive {
                buckets.purge.push(uuid.clone());
            }
            buckets.done.push(uuid);
        } else {
            buckets.pending.push(uuid);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuids() -> [String; 3] {
        ["0".repeat(32), "1".repeat(32), "2".repeat(32)]
    }

    #[test]
    fn test_classify_partitions_listing() {
        let [a, b, c] = uuids();
        let listing = [
            format!("{}.tar.gz.done", a),
            format!("{}.tar.gz", b),
            format!("{}.tar.gz.done", b),
            format!("{}.tar.gz", c),
        ];
        let buckets = classify(&listing);
        assert_eq!(buckets.pending, vec![c]);
        assert_eq!(buckets.done, vec![a.clone(), b]);
        assert_eq!(buckets.purge, vec![a]);
    }

    #[test]
    fn test_classify_empty_listing() {
        let buckets = classify(Vec::<String>::new());
        assert!(buckets.pending.is_empty());
        assert!(buckets.done.is_empty());
        assert!(buckets.purge.is_empty());
    }

    #[test]
    fn test_classify_ignores_foreign_files() {
        let [a, _, _] = uuids();
        let listing = [
            "index.json".to_string(),
            format!("{}.tar.gz", a),
            "notes.txt".to_string(),
            "short.tar.gz".to_string(),
            format!("{}.tar.gz.tmp", a),
        ];
        let buckets = classify(&listing);
        assert_eq!(buckets.pending, vec![a]);
        assert!(buckets.done.is_empty());
        assert!(buckets.purge.is_empty());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let [a, b, c] = uuids();
        let listing = [
            format!("{}.tar.gz.done", a),
            format!("{}.tar.gz", b),
            format!("{}.tar.gz.done", b),
            format!("{}.tar.gz", c),
        ];
        assert_eq!(classify(&listing), classify(&listing));
    }

    #[test]
    fn test_classify_dedups_repeated_names() {
        let [a, _, _] = uuids();
        let listing = [format!("{}.tar.gz", a), format!("{}.tar.gz", a)];
        let buckets = classify(&listing);
        assert_eq!(buckets.pending, vec![a]);
    }

    #[test]
    fn test_pending_and_done_are_disjoint() {
        let [a, b, c] = uuids();
        let listing = [
            format!("{}.tar.gz.done", a),
            format!("{}.tar.gz", b),
            format!("{}.tar.gz.done", b),
            format!("{}.tar.gz", c),
        ];
        let buckets = classify(&listing);
        for uuid in &buckets.pending {
            assert!(!buckets.done.contains(uuid));
        }
        // archive-only is never purge; both-files is done but not purge
        assert!(!buckets.purge.contains(&c));
        assert!(!buckets.purge.contains(&b));
    }
}
