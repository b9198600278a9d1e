//! Aligned allocation over the system allocator.
//!
//! Columnar buffers require a fixed 64-byte alignment so that SIMD loads and
//! cache-line-sized accesses never straddle a boundary. The system allocator
//! only guarantees `max_align_t`, so every request goes through an explicit
//! [`Layout`] with [`ALIGNMENT`].
//!
//! # Zero-size allocations
//!
//! Zero-size requests never touch the real allocator. They all resolve to a
//! single static, correctly aligned, non-null sentinel address, recognized by
//! pointer identity in every deallocation path.

use crate::error::{Error, Result};
use std::alloc::{self, Layout};
use std::cell::UnsafeCell;
use std::cmp;
use std::ptr::NonNull;

/// Alignment of every allocation, in bytes.
///
/// Applies regardless of the requested size.
pub const ALIGNMENT: usize = 64;

/// Backing storage for the zero-size sentinel.
///
/// One byte is enough: the address is never dereferenced, it only has to be
/// non-null and 64-byte aligned.
#[repr(align(64))]
struct ZeroSizeArea(UnsafeCell<[u8; 1]>);

// SAFETY: the area is never read or written through; it only provides a
// stable aligned address shared by all threads.
unsafe impl Sync for ZeroSizeArea {}

static ZERO_SIZE_AREA: ZeroSizeArea = ZeroSizeArea(UnsafeCell::new([0]));

/// The process-wide sentinel returned for all zero-size allocations.
#[inline]
fn zero_size_ptr() -> NonNull<u8> {
    // SAFETY: a pointer derived from a static is never null.
    unsafe { NonNull::new_unchecked(ZERO_SIZE_AREA.0.get().cast::<u8>()) }
}

/// Recognize the sentinel by identity, not by size.
#[inline]
fn is_zero_size_ptr(ptr: NonNull<u8>) -> bool {
    ptr == zero_size_ptr()
}

/// Directs allocations to the standard system allocator at [`ALIGNMENT`].
///
/// This is the raw backend underneath [`SystemPool`](crate::memory::SystemPool).
/// It performs no size validation and no accounting; both live in the pool
/// layer.
pub struct SystemAllocator;

impl SystemAllocator {
    /// Allocate `size` bytes at [`ALIGNMENT`].
    ///
    /// A `size` of 0 returns the zero-size sentinel without touching the
    /// underlying allocator. Failure has no side effect.
    ///
    /// # Errors
    ///
    /// - `OutOfMemory` if the allocator cannot satisfy the request.
    /// - `Invalid` if the layout is rejected (cannot happen for the fixed
    ///   alignment with a validated size; kept for parity with the layout
    ///   contract).
    pub fn allocate_aligned(size: i64) -> Result<NonNull<u8>> {
        debug_assert!(size >= 0);
        if size == 0 {
            return Ok(zero_size_ptr());
        }
        let layout = Layout::from_size_align(size as usize, ALIGNMENT).map_err(|_| {
            Error::Invalid(format!(
                "invalid allocation layout: size {size}, alignment {ALIGNMENT}"
            ))
        })?;
        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw).ok_or_else(|| Error::OutOfMemory(format!("allocation of size {size} failed")))
    }

    /// Resize the block behind `ptr` from `old_size` to `new_size` bytes.
    ///
    /// `realloc` is not used here: it does not guarantee the fixed alignment.
    /// Instead a fresh aligned block is allocated, `min(old_size, new_size)`
    /// bytes are copied, and the old block is released.
    ///
    /// If the current pointer is the zero-size sentinel, this degrades to a
    /// fresh allocation. A `new_size` of 0 frees the block and rebinds `ptr`
    /// to the sentinel.
    ///
    /// # Errors
    ///
    /// On allocation failure the original block and its contents are
    /// untouched; `ptr` still refers to it and the caller still owns it.
    pub fn reallocate_aligned(old_size: i64, new_size: i64, ptr: &mut NonNull<u8>) -> Result<()> {
        let previous = *ptr;
        if is_zero_size_ptr(previous) {
            debug_assert_eq!(old_size, 0);
            *ptr = Self::allocate_aligned(new_size)?;
            return Ok(());
        }
        if new_size == 0 {
            Self::deallocate_aligned(previous, old_size);
            *ptr = zero_size_ptr();
            return Ok(());
        }

        let fresh = Self::allocate_aligned(new_size)?;
        let to_copy = cmp::min(old_size, new_size) as usize;
        // SAFETY: both blocks are live, hold at least `to_copy` bytes, and
        // are distinct allocations.
        unsafe {
            std::ptr::copy_nonoverlapping(previous.as_ptr(), fresh.as_ptr(), to_copy);
        }
        Self::deallocate_aligned(previous, old_size);
        *ptr = fresh;
        Ok(())
    }

    /// Release the block behind `ptr`.
    ///
    /// The sentinel is a no-op (expects `size == 0`). The caller-supplied
    /// `size` is trusted to match the original allocation; supplying a wrong
    /// size is a precondition violation, not something detected here.
    pub fn deallocate_aligned(ptr: NonNull<u8>, size: i64) {
        if is_zero_size_ptr(ptr) {
            debug_assert_eq!(size, 0);
            return;
        }
        // SAFETY: per the pool contract, `ptr` was obtained from
        // `allocate_aligned` with exactly this size and alignment.
        unsafe {
            let layout = Layout::from_size_align_unchecked(size as usize, ALIGNMENT);
            alloc::dealloc(ptr.as_ptr(), layout);
        }
    }

    /// Ask the allocator to return unused pages to the OS.
    ///
    /// Best effort: a no-op on targets without `malloc_trim`.
    pub fn release_unused() {
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        {
            // SAFETY: malloc_trim has no memory-safety preconditions.
            unsafe {
                libc::malloc_trim(0);
            }
        }
    }
}
