//! Error types for Tessera.

use thiserror::Error;

/// Result type alias using Tessera's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Tessera operations.
///
/// Success is expressed as `Result::Ok`; every variant carries a
/// human-readable message describing the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument was invalid (e.g. a negative size).
    #[error("invalid: {0}")]
    Invalid(String),

    /// The operation was cancelled before completion.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// A lookup key was not found.
    #[error("key error: {0}")]
    KeyError(String),

    /// A size or capacity limit would be exceeded.
    #[error("capacity error: {0}")]
    CapacityError(String),

    /// The underlying allocator could not satisfy the request.
    #[error("out of memory: {0}")]
    OutOfMemory(String),
}

impl Error {
    /// Log this error together with `context`, then abort the process.
    ///
    /// Reserved for callers facing unrecoverable state; nothing in the
    /// memory subsystem invokes this itself.
    pub fn abort(&self, context: &str) -> ! {
        if context.is_empty() {
            tracing::error!("fatal error: {self}");
        } else {
            tracing::error!("fatal error: {context}: {self}");
        }
        std::process::abort()
    }
}
