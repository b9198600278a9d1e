//! Integration tests for pool behavior across the public API.
//!
//! Counter assertions against the process-wide default pool live in a single
//! test, since the instance is shared by every test in this binary.

use std::sync::Arc;
use std::thread;
use tessera::memory::{create_default, default_memory_pool, MemoryPool, SystemPool, ALIGNMENT};

// ============================================================================
// Default Pool Tests
// ============================================================================

/// The canonical allocate/free lifecycle against the default pool.
#[test]
fn test_default_pool_lifecycle() {
    let pool = default_memory_pool();
    assert_eq!(pool.backend_name(), "system");
    let base = pool.bytes_allocated();

    let data = pool.allocate(100).unwrap();
    assert_eq!(data.as_ptr() as usize % ALIGNMENT, 0);
    assert_eq!(pool.bytes_allocated(), base + 100);

    let data2 = pool.allocate(27).unwrap();
    assert_eq!(data2.as_ptr() as usize % ALIGNMENT, 0);
    assert_eq!(pool.bytes_allocated(), base + 127);

    pool.free(data, 100);
    assert_eq!(pool.bytes_allocated(), base + 27);
    pool.free(data2, 27);
    assert_eq!(pool.bytes_allocated(), base);

    assert!(pool.max_memory() >= 127);
}

#[test]
fn test_default_pool_oom() {
    let pool = default_memory_pool();

    // Subtract 63 to prevent overflow after the size is aligned.
    let to_alloc = i64::MAX - 63;
    let result = pool.allocate(to_alloc);
    assert!(matches!(result, Err(tessera::Error::OutOfMemory(_))));
}

// ============================================================================
// Owned Pool Tests
// ============================================================================

/// Explicitly created pools account independently of each other.
#[test]
fn test_created_pools_are_independent() {
    let owned = create_default();
    let other = create_default();
    assert_eq!(owned.backend_name(), "system");

    let ptr = owned.allocate(4096).unwrap();
    assert_eq!(owned.bytes_allocated(), 4096);
    assert_eq!(other.bytes_allocated(), 0);

    owned.free(ptr, 4096);
    assert_eq!(owned.bytes_allocated(), 0);
    assert_eq!(owned.max_memory(), 4096);
    assert_eq!(other.max_memory(), 0);
}

#[test]
fn test_pool_as_trait_object() {
    let pool: Box<dyn MemoryPool> = Box::new(SystemPool::new());

    let mut ptr = pool.allocate(0).unwrap();
    pool.reallocate(0, 512, &mut ptr).unwrap();
    assert_eq!(ptr.as_ptr() as usize % ALIGNMENT, 0);
    assert_eq!(pool.bytes_allocated(), 512);

    pool.reallocate(512, 0, &mut ptr).unwrap();
    assert_eq!(pool.bytes_allocated(), 0);
    pool.free(ptr, 0);
    assert_eq!(pool.bytes_allocated(), 0);
}

#[test]
fn test_reallocate_preserves_contents_across_sizes() {
    let pool = SystemPool::new();

    let mut ptr = pool.allocate(64).unwrap();
    // SAFETY: the block is live and 64 bytes long.
    unsafe {
        for i in 0..64u8 {
            ptr.as_ptr().add(i as usize).write(i);
        }
    }

    for (old, new) in [(64i64, 256i64), (256, 4096), (4096, 64)] {
        pool.reallocate(old, new, &mut ptr).unwrap();
        assert_eq!(ptr.as_ptr() as usize % ALIGNMENT, 0);
        // SAFETY: the first 64 bytes survive every step above.
        unsafe {
            for i in 0..64u8 {
                assert_eq!(ptr.as_ptr().add(i as usize).read(), i);
            }
        }
    }

    pool.free(ptr, 64);
    assert_eq!(pool.bytes_allocated(), 0);
}

#[test]
fn test_release_unused_is_callable() {
    let pool = create_default();
    let ptr = pool.allocate(1 << 20).unwrap();
    pool.free(ptr, 1 << 20);
    pool.release_unused();
    assert_eq!(pool.bytes_allocated(), 0);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

/// Mixed allocate/reallocate/free traffic from several threads settles to
/// exact accounting.
#[test]
fn test_concurrent_mixed_traffic() {
    let pool = Arc::new(SystemPool::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let size = 64 * (t + 1) as i64;
                for _ in 0..500 {
                    let mut ptr = pool.allocate(size).unwrap();
                    pool.reallocate(size, size * 2, &mut ptr).unwrap();
                    pool.free(ptr, size * 2);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(pool.bytes_allocated(), 0);
    assert!(pool.max_memory() >= 128);
}

#[test]
fn test_concurrent_readers_do_not_block() {
    let pool = Arc::new(SystemPool::new());
    let writer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            for _ in 0..2_000 {
                let ptr = pool.allocate(128).unwrap();
                pool.free(ptr, 128);
            }
        })
    };

    // Peak maintenance trails the byte counter by one atomic op, so only
    // membership is asserted while the writer is live.
    for _ in 0..2_000 {
        let allocated = pool.bytes_allocated();
        assert!(allocated == 0 || allocated == 128);
    }

    writer.join().unwrap();
    assert_eq!(pool.bytes_allocated(), 0);
    assert_eq!(pool.max_memory(), 128);
}
