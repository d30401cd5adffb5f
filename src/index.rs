// In-memory bundle metadata index, reconciled from the storage directory
use crate::state::{self, BundleStatus};
use serde::Serialize;

/// Lifecycle state of a single bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleState {
    /// Archive written, not yet handed off
    Pending,
    /// Marker present, archive retained
    Done,
    /// Marker present but archive removed out-of-band; must be reaped
    Purge,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleRecord {
    pub uuid: String,
    pub state: BundleState,
}

/// Authoritative identifier -> state map.
///
/// All state changes go through `record_created`, `record_processed` and
/// `remove`; `from_listing` rebuilds the index from a directory scan and is
/// the repair path for drift the write path never sees (out-of-band file
/// removal is the only way a record becomes `Purge`).
#[derive(Debug, Default, Clone)]
pub struct BundleIndex {
    records: Vec<BundleRecord>,
}

impl BundleIndex {
    /// Rebuild the index from a directory listing
    pub fn from_listing<I, S>(listing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let buckets = state::classify(listing);
        let mut records = Vec::with_capacity(buckets.pending.len() + buckets.done.len());
        for uuid in buckets.pending {
            records.push(BundleRecord {
                uuid,
                state: BundleState::Pending,
            });
        }
        for uuid in buckets.done {
            let state = if buckets.purge.contains(&uuid) {
                BundleState::Purge
            } else {
                BundleState::Done
            };
            records.push(BundleRecord { uuid, state });
        }
        Self { records }
    }

    pub fn get(&self, uuid: &str) -> Option<&BundleRecord> {
        self.records.iter().find(|r| r.uuid == uuid)
    }

    fn set(&mut self, uuid: &str, state: BundleState) {
        match self.records.iter_mut().find(|r| r.uuid == uuid) {
            Some(record) => record.state = state,
            None => self.records.push(BundleRecord {
                uuid: uuid.to_string(),
                state,
            }),
        }
    }

    /// Record a freshly created bundle
    pub fn record_created(&mut self, uuid: &str) {
        self.set(uuid, BundleState::Pending);
    }

    /// Record the pending -> done transition (marker written)
    pub fn record_processed(&mut self, uuid: &str) {
        self.set(uuid, BundleState::Done);
    }

    /// Drop a record after its files were removed
    pub fn remove(&mut self, uuid: &str) {
        self.records.retain(|r| r.uuid != uuid);
    }

    /// One status record per indexed bundle; `processed` covers both the
    /// done and purge states (an orphaned marker still counts as handed off)
    pub fn statuses(&self) -> Vec<BundleStatus> {
        self.records
            .iter()
            .map(|r| BundleStatus {
                uuid: r.uuid.clone(),
                processed: r.state != BundleState::Pending,
            })
            .collect()
    }

    /// Identifiers eligible for bulk removal
    pub fn purge_set(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.state == BundleState::Purge)
            .map(|r| r.uuid.clone())
            .collect()
    }

    /// Number of records in a given state
    pub fn count(&self, state: BundleState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_listing_states() {
        let a = "a".repeat(32);
        let b = "b".repeat(32);
        let c = "c".repeat(32);
        let listing = [
            format!("{}.tar.gz.done", a),
            format!("{}.tar.gz", b),
            format!("{}.tar.gz.done", b),
            format!("{}.tar.gz", c),
        ];
        let index = BundleIndex::from_listing(&listing);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&a).unwrap().state, BundleState::Purge);
        assert_eq!(index.get(&b).unwrap().state, BundleState::Done);
        assert_eq!(index.get(&c).unwrap().state, BundleState::Pending);
        assert_eq!(index.purge_set(), vec![a]);
    }

    #[test]
    fn test_write_path_transitions() {
        let uuid = "d".repeat(32);
        let mut index = BundleIndex::default();
        assert!(index.is_empty());

        index.record_created(&uuid);
        assert_eq!(index.get(&uuid).unwrap().state, BundleState::Pending);

        index.record_processed(&uuid);
        assert_eq!(index.get(&uuid).unwrap().state, BundleState::Done);

        index.remove(&uuid);
        assert!(index.get(&uuid).is_none());
        // removing again is a no-op
        index.remove(&uuid);
        assert!(index.is_empty());
    }

    #[test]
    fn test_statuses_mark_done_and_purge_as_processed() {
        let a = "a".repeat(32);
        let b = "b".repeat(32);
        let listing = [format!("{}.tar.gz.done", a), format!("{}.tar.gz", b)];
        let index = BundleIndex::from_listing(&listing);
        let mut statuses = index.statuses();
        statuses.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        assert!(statuses[0].processed);
        assert!(!statuses[1].processed);
    }

    #[test]
    fn test_counts() {
        let a = "a".repeat(32);
        let b = "b".repeat(32);
        let listing = [
            format!("{}.tar.gz", a),
            format!("{}.tar.gz.done", b),
        ];
        let index = BundleIndex::from_listing(&listing);
        assert_eq!(index.count(BundleState::Pending), 1);
        assert_eq!(index.count(BundleState::Purge), 1);
        assert_eq!(index.count(BundleState::Done), 0);
    }
}
