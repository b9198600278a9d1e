//! The memory pool capability interface and the system-backed pool.

use super::alloc::SystemAllocator;
use super::backend::{default_backend, BackendKind};
use super::stats::PoolStats;
use crate::error::{Error, Result};
use std::ptr::NonNull;

/// A pool of aligned memory with aggregate usage accounting.
///
/// Callers are written against "a pool" without knowing which backend is
/// active; the binding is fixed per pool instance at construction. All
/// methods are safe to call from multiple threads concurrently without an
/// external lock.
///
/// The pool keeps no table of live allocations: callers must pass back the
/// exact size a block was obtained with on [`free`](MemoryPool::free) and
/// [`reallocate`](MemoryPool::reallocate). Violating that (wrong size,
/// double free, foreign pointer) is a precondition violation with undefined
/// consequences for accounting and for the underlying allocator.
pub trait MemoryPool: Send + Sync {
    /// Allocate a new 64-byte-aligned region of `size` bytes.
    ///
    /// A `size` of 0 succeeds with a non-null sentinel address.
    ///
    /// # Errors
    ///
    /// - `Invalid` if `size` is negative.
    /// - `CapacityError` if `size` exceeds the representable allocation limit.
    /// - `OutOfMemory` if the backend cannot satisfy the request.
    ///
    /// Statistics are unchanged on failure.
    fn allocate(&self, size: i64) -> Result<NonNull<u8>>;

    /// Resize an allocated region from `old_size` to `new_size` bytes.
    ///
    /// May move the block (aligned reallocation is copy-based); on success
    /// `ptr` is rebound to the new location. On failure `ptr` and the block
    /// it refers to are untouched and statistics are unchanged.
    ///
    /// # Errors
    ///
    /// Same validation as [`allocate`](MemoryPool::allocate), applied to
    /// `new_size`.
    fn reallocate(&self, old_size: i64, new_size: i64, ptr: &mut NonNull<u8>) -> Result<()>;

    /// Release an allocated region. Cannot fail; records `-size`.
    fn free(&self, ptr: NonNull<u8>, size: i64);

    /// Hint the backend to return unused memory to the OS. Best effort.
    fn release_unused(&self) {}

    /// Bytes allocated through this pool and not yet freed.
    fn bytes_allocated(&self) -> i64;

    /// Peak value of [`bytes_allocated`](MemoryPool::bytes_allocated), or
    /// `-1` if this pool does not track peaks.
    fn max_memory(&self) -> i64 {
        -1
    }

    /// Name of the backend this pool is bound to (e.g. `"system"`).
    fn backend_name(&self) -> &str;
}

/// Validate a requested size before it reaches the backend.
fn check_size(size: i64, operation: &str) -> Result<()> {
    if size < 0 {
        return Err(Error::Invalid(format!(
            "negative {operation} size: {size}"
        )));
    }
    if size as u64 >= usize::MAX as u64 {
        return Err(Error::CapacityError(format!(
            "{operation} size {size} overflows usize"
        )));
    }
    Ok(())
}

/// A pool bound to the system allocator, with peak tracking.
pub struct SystemPool {
    stats: PoolStats,
}

impl SystemPool {
    /// Create a pool with zeroed statistics.
    ///
    /// `const` so the process-wide default instance can be a plain `static`.
    pub const fn new() -> Self {
        Self {
            stats: PoolStats::new(),
        }
    }
}

impl Default for SystemPool {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPool for SystemPool {
    fn allocate(&self, size: i64) -> Result<NonNull<u8>> {
        check_size(size, "allocation")?;
        let ptr = SystemAllocator::allocate_aligned(size)?;
        self.stats.update_allocated_bytes(size);
        Ok(ptr)
    }

    fn reallocate(&self, old_size: i64, new_size: i64, ptr: &mut NonNull<u8>) -> Result<()> {
        check_size(new_size, "reallocation")?;
        SystemAllocator::reallocate_aligned(old_size, new_size, ptr)?;
        self.stats.update_allocated_bytes(new_size - old_size);
        Ok(())
    }

    fn free(&self, ptr: NonNull<u8>, size: i64) {
        SystemAllocator::deallocate_aligned(ptr, size);
        self.stats.update_allocated_bytes(-size);
    }

    fn release_unused(&self) {
        SystemAllocator::release_unused();
    }

    fn bytes_allocated(&self) -> i64 {
        self.stats.bytes_allocated()
    }

    fn max_memory(&self) -> i64 {
        self.stats.max_memory()
    }

    fn backend_name(&self) -> &str {
        "system"
    }
}

/// Create a fresh, caller-owned pool bound to the resolved default backend.
///
/// Independent of the process-wide default instance returned by
/// [`default_memory_pool`](super::default_memory_pool).
pub fn create_default() -> Box<dyn MemoryPool> {
    match default_backend() {
        BackendKind::System => Box::new(SystemPool::new()),
    }
}
