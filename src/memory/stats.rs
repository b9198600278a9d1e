//! Atomic usage accounting for memory pools.

use std::sync::atomic::{AtomicI64, Ordering};

/// Tracks the bytes currently outstanding in a pool and the observed peak.
///
/// Both counters are lock-free. `bytes_allocated` is exact under concurrent
/// updates; the peak is best-effort, since a "maximum" is ill-defined while
/// other threads are mutating the total (two interleaved updates can leave a
/// transient sum no single thread observed).
///
/// A negative `bytes_allocated` indicates caller misuse (a free with a wrong
/// size, or a double free), not a pool bug; it is not detected here.
pub struct PoolStats {
    bytes_allocated: AtomicI64,
    max_memory: AtomicI64,
}

impl PoolStats {
    /// Create zeroed counters. `const` so stats can live in a plain `static`.
    pub const fn new() -> Self {
        Self {
            bytes_allocated: AtomicI64::new(0),
            max_memory: AtomicI64::new(0),
        }
    }

    /// Bytes allocated through the pool and not yet freed.
    #[inline]
    pub fn bytes_allocated(&self) -> i64 {
        self.bytes_allocated.load(Ordering::Acquire)
    }

    /// Highest value `bytes_allocated` has reached.
    ///
    /// Monotonically non-decreasing; only a successful allocation or growth
    /// raises it.
    #[inline]
    pub fn max_memory(&self) -> i64 {
        self.max_memory.load(Ordering::Acquire)
    }

    /// Apply the net signed delta of one pool operation.
    ///
    /// Must be called exactly once per state-changing operation: positive
    /// for growth, negative for shrink or free.
    #[inline]
    pub fn update_allocated_bytes(&self, diff: i64) {
        let allocated = self.bytes_allocated.fetch_add(diff, Ordering::AcqRel) + diff;
        if diff > 0 {
            self.max_memory.fetch_max(allocated, Ordering::AcqRel);
        }
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new()
    }
}
