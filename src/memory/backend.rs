//! Backend registry and default-backend selection.
//!
//! The registry is an ordered list of supported backends; position 0 is the
//! default. A process-wide environment override can select a backend by name.
//! Both the override and the effective default are resolved at most once per
//! process, behind [`OnceLock`] latches, so concurrent first callers all
//! observe the same decision.

use std::sync::OnceLock;

/// Environment variable selecting the default memory pool backend by name.
pub const DEFAULT_POOL_ENV_VAR: &str = "TESSERA_DEFAULT_MEMORY_POOL";

/// A concrete allocator backend a pool can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// The standard system allocator, at the fixed 64-byte alignment.
    System,
}

/// A registry entry pairing a backend with its configuration name.
#[derive(Debug, Clone, Copy)]
pub struct SupportedBackend {
    /// Name matched (case-sensitively) against the environment override.
    pub name: &'static str,
    /// The backend this name selects.
    pub backend: BackendKind,
}

/// The ordered registry of supported backends. Position 0 is the default.
pub fn supported_backends() -> &'static [SupportedBackend] {
    static BACKENDS: [SupportedBackend; 1] = [SupportedBackend {
        name: "system",
        backend: BackendKind::System,
    }];
    &BACKENDS
}

/// The backend requested via [`DEFAULT_POOL_ENV_VAR`], if any.
///
/// Read once per process: unset or empty means no override; an unrecognized
/// value logs a warning naming the supported set and also means no override.
pub(crate) fn user_selected_backend() -> Option<BackendKind> {
    static USER_SELECTED: OnceLock<Option<BackendKind>> = OnceLock::new();
    *USER_SELECTED.get_or_init(|| {
        let name = match std::env::var(DEFAULT_POOL_ENV_VAR) {
            Ok(name) => name,
            Err(_) => return None,
        };
        if name.is_empty() {
            // An empty variable is considered unset.
            return None;
        }
        if let Some(found) = supported_backends().iter().find(|b| b.name == name) {
            return Some(found.backend);
        }
        let supported: Vec<String> = supported_backends()
            .iter()
            .map(|b| format!("'{}'", b.name))
            .collect();
        tracing::warn!(
            "unsupported backend '{}' specified in {}; supported: {}",
            name,
            DEFAULT_POOL_ENV_VAR,
            supported.join(", ")
        );
        None
    })
}

/// The effective default backend for this process.
///
/// The environment override wins if present; otherwise the first registry
/// entry. Memoized independently of the override so each latch stays a
/// simple one-shot decision.
pub fn default_backend() -> BackendKind {
    static DEFAULT: OnceLock<BackendKind> = OnceLock::new();
    *DEFAULT.get_or_init(|| {
        user_selected_backend().unwrap_or_else(|| supported_backends()[0].backend)
    })
}
