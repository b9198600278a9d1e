//! Backend resolution with an unrecognized override.
//!
//! Resolution is memoized once per process, so this scenario gets its own
//! test binary: the variable must be set before anything touches the
//! registry, and only one test may drive resolution.

use tessera::memory::{
    default_backend, default_memory_pool, BackendKind, MemoryPool, DEFAULT_POOL_ENV_VAR,
};

/// An unsupported backend name falls back to the default, not to failure.
#[test]
fn test_unsupported_override_falls_back_to_system() {
    std::env::set_var(DEFAULT_POOL_ENV_VAR, "definitely-not-a-backend");

    assert_eq!(default_backend(), BackendKind::System);

    // The resulting pool is fully functional.
    let pool = default_memory_pool();
    assert_eq!(pool.backend_name(), "system");

    let ptr = pool.allocate(100).unwrap();
    assert_eq!(ptr.as_ptr() as usize % 64, 0);
    assert_eq!(pool.bytes_allocated(), 100);
    pool.free(ptr, 100);
    assert_eq!(pool.bytes_allocated(), 0);

    // The decision is terminal: clearing the variable changes nothing.
    std::env::remove_var(DEFAULT_POOL_ENV_VAR);
    assert_eq!(default_backend(), BackendKind::System);
}
