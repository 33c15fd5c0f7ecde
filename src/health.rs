//! Engine health reporting.
//!
//! Grounded in the teacher's `HealthStatus`/`ServiceStatus` shape, adapted
//! to what spec §4.6 actually asks the engine to expose: point-in-time
//! counts derived from the currently published snapshot, plus reload
//! bookkeeping the snapshot itself doesn't carry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// Point-in-time health of a [`crate::engine::QueryEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineHealth {
    /// Number of records in the currently published snapshot.
    pub package_count: usize,
    /// Number of distinct keys in each named index.
    pub index_sizes: HashMap<String, usize>,
    /// Unix-epoch timestamp of the last successful reload, `None` before
    /// the first one completes.
    pub last_reload: Option<i64>,
    /// Whether a `Reload` call is currently in flight.
    pub reload_in_progress: bool,
}

impl EngineHealth {
    /// What: Compute a health snapshot from `snapshot` and the engine's
    /// reload bookkeeping.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, tracker: &ReloadTracker) -> Self {
        let mut index_sizes = HashMap::new();
        for index in [
            snapshot.pkgname(),
            snapshot.pkgbase(),
            snapshot.maintainers(),
            snapshot.groups(),
            snapshot.keywords(),
            snapshot.provides(),
            snapshot.depends(),
            snapshot.optdepends(),
            snapshot.makedepends(),
            snapshot.checkdepends(),
        ] {
            index_sizes.insert(index.name().to_string(), index.len());
        }

        Self {
            package_count: snapshot.len(),
            index_sizes,
            last_reload: tracker.last_reload(),
            reload_in_progress: tracker.in_progress(),
        }
    }
}

/// Tracks reload timing/in-flight state for [`EngineHealth`] reporting.
///
/// Kept separate from [`Snapshot`] because a snapshot describes corpus
/// content, not the reload process that produced it; a `Reload` in flight
/// has no snapshot of its own to report from.
#[derive(Debug, Default)]
pub struct ReloadTracker {
    last_reload: AtomicI64,
    has_reloaded: AtomicBool,
    in_progress: AtomicBool,
}

impl ReloadTracker {
    /// What: Create a tracker with no recorded reload yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a reload as having started.
    pub fn begin(&self) {
        self.in_progress.store(true, Ordering::SeqCst);
    }

    /// What: Mark a reload as finished, recording `completed_at` (Unix
    /// epoch seconds) as the new `last_reload`.
    pub fn finish(&self, completed_at: i64) {
        self.last_reload.store(completed_at, Ordering::SeqCst);
        self.has_reloaded.store(true, Ordering::SeqCst);
        self.in_progress.store(false, Ordering::SeqCst);
    }

    /// Last successful reload timestamp, if any reload has completed yet.
    #[must_use]
    pub fn last_reload(&self) -> Option<i64> {
        self.has_reloaded
            .load(Ordering::SeqCst)
            .then(|| self.last_reload.load(Ordering::SeqCst))
    }

    /// Whether a reload is currently in flight.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    #[test]
    fn reload_tracker_starts_with_no_recorded_reload() {
        let tracker = ReloadTracker::new();
        assert_eq!(tracker.last_reload(), None);
        assert!(!tracker.in_progress());
    }

    #[test]
    fn reload_tracker_records_begin_and_finish() {
        let tracker = ReloadTracker::new();
        tracker.begin();
        assert!(tracker.in_progress());
        tracker.finish(1_700_000_000);
        assert!(!tracker.in_progress());
        assert_eq!(tracker.last_reload(), Some(1_700_000_000));
    }

    #[test]
    fn health_reports_package_count_and_index_sizes() {
        let storage = InMemoryStorage::new();
        storage.put(
            "expac-git",
            serde_json::to_vec(&crate::record::PackageRecord {
                name: "expac-git".into(),
                ..Default::default()
            })
            .unwrap(),
        );
        let snapshot = Snapshot::build(&storage);
        let tracker = ReloadTracker::new();
        tracker.finish(42);

        let health = EngineHealth::from_snapshot(&snapshot, &tracker);
        assert_eq!(health.package_count, 1);
        assert_eq!(health.index_sizes.get("pkgname"), Some(&1));
        assert_eq!(health.last_reload, Some(42));
        assert!(!health.reload_in_progress);
    }
}
