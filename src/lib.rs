//! # Tessera
//!
//! Memory infrastructure for a columnar data-processing runtime.
//!
//! The crate centers on [`memory::MemoryPool`], a capability interface for
//! 64-byte-aligned allocation with atomic usage accounting, backed by a
//! pluggable allocator backend. The process-wide default instance is
//! reached through [`memory::default_memory_pool`]; callers that want
//! isolated accounting create their own pool with
//! [`memory::create_default`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::memory::{create_default, MemoryPool, ALIGNMENT};
//!
//! let pool = create_default();
//!
//! let ptr = pool.allocate(256)?;
//! assert_eq!(ptr.as_ptr() as usize % ALIGNMENT, 0);
//! assert_eq!(pool.bytes_allocated(), 256);
//!
//! pool.free(ptr, 256);
//! assert_eq!(pool.bytes_allocated(), 0);
//! assert_eq!(pool.max_memory(), 256);
//! # Ok::<(), tessera::Error>(())
//! ```
//!
//! ## Backend selection
//!
//! The environment variable `TESSERA_DEFAULT_MEMORY_POOL` selects the
//! default backend by name (currently only `"system"`). Unset, empty, or
//! unrecognized values fall back to the registry default; the unrecognized
//! case logs a warning.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod memory;

pub use error::{Error, Result};
