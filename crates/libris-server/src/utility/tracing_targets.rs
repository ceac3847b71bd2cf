//! Tracing target constants for structured logging.
//!
//! Consistent targets allow per-area filtering, e.g.
//! `RUST_LOG=libris_server::authentication=debug`.

/// Token extraction, verification and identity lookup.
pub const TRACING_TARGET_AUTHENTICATION: &str = "libris_server::authentication";

/// Rights checks against the caller's role.
pub const TRACING_TARGET_AUTHORIZATION: &str = "libris_server::authorization";

/// Error recovery including middleware errors and request timeouts.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "libris_server::recovery::error";

/// Panic recovery in handlers.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "libris_server::recovery::panic";

/// Credential digest computation.
pub const TRACING_TARGET_CREDENTIAL_HASHER: &str = "libris_server::credential_hasher";

/// Session key management and token signing.
pub const TRACING_TARGET_SESSION_KEYS: &str = "libris_server::session_keys";

/// Store backends.
pub const TRACING_TARGET_STORE: &str = "libris_server::store";
