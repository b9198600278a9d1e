//! Pluggable memory allocation for columnar buffers.
//!
//! This module is the allocation layer of the runtime: a uniform interface
//! for requesting 64-byte-aligned memory blocks, resizing them, releasing
//! them, and tracking aggregate usage, independent of which allocator
//! backend services the request.
//!
//! # Architecture
//!
//! - [`MemoryPool`]: capability trait callers are written against
//! - [`SystemAllocator`]: raw aligned allocate/reallocate/free over the OS
//!   allocator, including the zero-size sentinel
//! - [`PoolStats`]: atomic byte accounting with peak tracking
//! - [`default_backend`]: one-shot backend resolution, honoring the
//!   [`DEFAULT_POOL_ENV_VAR`] override
//! - [`default_memory_pool`]: the process-wide default instance
//!
//! # Example
//!
//! ```rust
//! use tessera::memory::{default_memory_pool, MemoryPool};
//!
//! let pool = default_memory_pool();
//! let mut ptr = pool.allocate(1024)?;
//! assert_eq!(ptr.as_ptr() as usize % 64, 0);
//!
//! pool.reallocate(1024, 4096, &mut ptr)?;
//! pool.free(ptr, 4096);
//! # Ok::<(), tessera::Error>(())
//! ```

mod alloc;
mod backend;
mod global;
mod pool;
mod stats;

pub use alloc::{SystemAllocator, ALIGNMENT};
pub use backend::{
    default_backend, supported_backends, BackendKind, SupportedBackend, DEFAULT_POOL_ENV_VAR,
};
pub use global::{default_memory_pool, default_pool_is_finalizing, finalize_default_pool};
pub use pool::{create_default, MemoryPool, SystemPool};
pub use stats::PoolStats;
