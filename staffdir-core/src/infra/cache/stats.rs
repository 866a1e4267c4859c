use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskImageCacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub read_errors: u64,
    pub writes: u64,
    pub write_errors: u64,
}

#[derive(Debug, Default)]
pub struct DiskImageCacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    read_errors: AtomicU64,
    writes: AtomicU64,
    write_errors: AtomicU64,
}

impl DiskImageCacheStats {
    pub fn on_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_write_ok(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn on_write_err(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DiskImageCacheStatsSnapshot {
        DiskImageCacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}
