//! The process-wide default memory pool.
//!
//! The default pool and its finalization flag live in one const-initialized
//! static, so neither can exist without the other and no lazy construction
//! is needed for the pool itself (only backend resolution is lazy).
//!
//! Rust statics have no destructors, so the teardown signal is an explicit
//! shutdown hook instead of destructor coupling: a process that wants an
//! orderly shutdown calls [`finalize_default_pool`] once its subsystems stop
//! allocating, and late-running dependents check
//! [`default_pool_is_finalizing`] before freeing through the default pool.

use super::backend::{default_backend, BackendKind};
use super::pool::{MemoryPool, SystemPool};
use std::sync::atomic::{AtomicBool, Ordering};

/// Couples the finalization flag with the system pool it guards.
struct GlobalState {
    finalizing: AtomicBool,
    system_pool: SystemPool,
}

static GLOBAL_STATE: GlobalState = GlobalState {
    finalizing: AtomicBool::new(false),
    system_pool: SystemPool::new(),
};

/// The process-wide default memory pool.
///
/// Resolves the effective backend on first call (honoring the
/// [`DEFAULT_POOL_ENV_VAR`](super::DEFAULT_POOL_ENV_VAR) override) and
/// returns a non-owning reference to the matching singleton. The match is
/// exhaustive over [`BackendKind`]: adding a backend variant forces this
/// accessor to handle it at compile time.
pub fn default_memory_pool() -> &'static dyn MemoryPool {
    match default_backend() {
        BackendKind::System => &GLOBAL_STATE.system_pool,
    }
}

/// Mark the default pool as shutting down.
///
/// Terminal: once set, the flag never clears for the remainder of the
/// process. The pool itself stays usable (statics are never deallocated);
/// the flag only tells dependents that orderly teardown has begun.
pub fn finalize_default_pool() {
    GLOBAL_STATE.finalizing.store(true, Ordering::Relaxed);
}

/// Whether [`finalize_default_pool`] has been called.
pub fn default_pool_is_finalizing() -> bool {
    GLOBAL_STATE.finalizing.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The finalization flag is process-global and terminal, so its
    // transition is covered by a dedicated integration test binary; here we
    // only exercise the accessor.

    #[test]
    fn test_default_pool_is_system_backed() {
        let pool = default_memory_pool();
        assert_eq!(pool.backend_name(), "system");
        assert!(pool.max_memory() >= 0);
    }

    #[test]
    fn test_default_pool_is_shared() {
        let a = default_memory_pool();
        let b = default_memory_pool();
        assert!(std::ptr::addr_eq(a, b));
    }
}
