//! Snapshot caching with TTL expiry
//!
//! The engine keeps at most one crawl snapshot in memory. A snapshot is
//! served while it is fresh; once the TTL elapses the next search
//! triggers a recrawl. Replacement is a single assignment, so readers
//! either see the old snapshot or the new one, never a half-built
//! state. The refresh gate serializes recrawls without blocking reads.

use crate::catalog::Record;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, MutexGuard};

/// One complete crawl of the catalog, timestamped at capture.
#[derive(Debug)]
pub struct Snapshot {
    /// Every record the crawl produced, in merge order
    pub records: Vec<Record>,

    /// When the crawl completed
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Wraps crawl output with the current timestamp
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            captured_at: Utc::now(),
        }
    }

    /// How long ago this snapshot was captured
    pub fn age(&self) -> Duration {
        Utc::now() - self.captured_at
    }
}

/// Holds the current snapshot and guards its replacement.
pub struct SnapshotCache {
    ttl: Duration,
    current: RwLock<Option<Arc<Snapshot>>>,
    refresh_gate: Mutex<()>,
}

impl SnapshotCache {
    /// Creates an empty cache with the given TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds as i64),
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Returns the current snapshot if it is still servable
    ///
    /// A snapshot is servable while it is non-empty and strictly
    /// younger than the TTL. An empty snapshot is treated as a miss so
    /// a failed or empty crawl gets retried on the next search.
    pub fn fresh_snapshot(&self) -> Option<Arc<Snapshot>> {
        let guard = self.current.read().unwrap();
        let snapshot = guard.as_ref()?;
        if snapshot.records.is_empty() || snapshot.age() >= self.ttl {
            return None;
        }
        Some(Arc::clone(snapshot))
    }

    /// Installs a new snapshot and returns it
    pub fn store(&self, records: Vec<Record>) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::new(records));
        *self.current.write().unwrap() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Acquires the refresh gate
    ///
    /// Callers must re-check [`fresh_snapshot`](Self::fresh_snapshot)
    /// after acquiring; another task may have refreshed while this one
    /// waited.
    pub async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }

    /// Backdates the current snapshot, for expiry tests
    #[cfg(test)]
    fn backdate(&self, age: Duration) {
        let mut guard = self.current.write().unwrap();
        if let Some(snapshot) = guard.take() {
            let mut inner = Arc::try_unwrap(snapshot).unwrap();
            inner.captured_at = Utc::now() - age;
            *guard = Some(Arc::new(inner));
        }
    }
}
