//! One-way credential digests.
//!
//! Credentials are stored as the lowercase hex SHA-256 of the plaintext and
//! logins are verified by comparing digests.

use sha2::{Digest, Sha256};

use crate::utility::tracing_targets::TRACING_TARGET_CREDENTIAL_HASHER as TRACING_TARGET;

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Deterministic SHA-256 credential hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Creates a new instance of the [`CredentialHasher`] service.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the 64-character lowercase hex digest of `secret`.
    pub fn hash(&self, secret: &str) -> String {
        let digest = Sha256::digest(secret.as_bytes());
        hex::encode(digest)
    }

    /// Returns `true` if `secret` hashes to `digest`.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        let matches = self.hash(secret).eq_ignore_ascii_case(digest);

        tracing::trace!(
            target: TRACING_TARGET,
            matches,
            "credential digest compared"
        );

        matches
    }
}
