use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cheap-to-clone counters shared by every clone of a [`FileAccessor`](crate::FileAccessor).
#[derive(Clone, Default)]
pub struct AccessStats {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    reads: AtomicU64,
    writes: AtomicU64,
    lists: AtomicU64,
    failures: AtomicU64,
}

impl AccessStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&self, ok: bool) {
        self.inner.reads.fetch_add(1, Ordering::Relaxed);
        self.record_failure(ok);
    }

    pub fn record_write(&self, ok: bool) {
        self.inner.writes.fetch_add(1, Ordering::Relaxed);
        self.record_failure(ok);
    }

    pub fn record_list(&self, ok: bool) {
        self.inner.lists.fetch_add(1, Ordering::Relaxed);
        self.record_failure(ok);
    }

    fn record_failure(&self, ok: bool) {
        if !ok {
            self.inner.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> AccessStatsSnapshot {
        AccessStatsSnapshot {
            reads: self.inner.reads.load(Ordering::Relaxed),
            writes: self.inner.writes.load(Ordering::Relaxed),
            lists: self.inner.lists.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for AccessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("AccessStats")
            .field("reads", &snapshot.reads)
            .field("writes", &snapshot.writes)
            .field("lists", &snapshot.lists)
            .field("failures", &snapshot.failures)
            .finish()
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AccessStatsSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub lists: u64,
    pub failures: u64,
}
