//! Shared-secret key material for signing identity tokens.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::utility::tracing_targets::TRACING_TARGET_SESSION_KEYS as TRACING_TARGET;
use crate::{Error, Result};

/// Signing algorithm used for every identity token.
pub const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Session signing configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct SessionKeysConfig {
    /// Shared secret used to sign and verify identity tokens.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "JWT_SECRET", hide_env_values = true)
    )]
    pub jwt_secret: String,

    /// Lifetime of an issued token, in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "JWT_EXPIRES_IN_SECS", default_value_t = SessionKeysConfig::DEFAULT_EXPIRES_IN_SECS)
    )]
    #[serde(default = "SessionKeysConfig::default_expires_in_secs")]
    pub jwt_expires_in_secs: u64,
}

impl SessionKeysConfig {
    /// One day.
    pub const DEFAULT_EXPIRES_IN_SECS: u64 = 86_400;

    /// Creates a configuration with the default token lifetime.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expires_in_secs: Self::DEFAULT_EXPIRES_IN_SECS,
        }
    }

    /// Overrides the token lifetime.
    pub fn with_expires_in_secs(mut self, secs: u64) -> Self {
        self.jwt_expires_in_secs = secs;
        self
    }

    fn default_expires_in_secs() -> u64 {
        Self::DEFAULT_EXPIRES_IN_SECS
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(Error::config("JWT secret cannot be empty"));
        }

        if self.jwt_expires_in_secs == 0 {
            return Err(Error::config("JWT lifetime must be greater than 0"));
        }

        Ok(())
    }
}

impl fmt::Debug for SessionKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeysConfig")
            .field("jwt_secret", &"***")
            .field("jwt_expires_in_secs", &self.jwt_expires_in_secs)
            .finish()
    }
}

/// Keys used for identity token signing and verification.
///
/// Cheap to clone; the key material is shared.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    config: SessionKeysConfig,
}

impl SessionKeys {
    /// Derives the signing keys from the configured secret.
    pub fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        config.validate()?;

        let secret = config.jwt_secret.as_bytes();
        let inner = Arc::new(SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
            config: config.clone(),
        });

        tracing::info!(
            target: TRACING_TARGET,
            algorithm = ?SESSION_ALGORITHM,
            expires_in_secs = config.jwt_expires_in_secs,
            "session keys initialized",
        );

        Ok(Self { inner })
    }

    /// Returns a reference to the decoding key.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns a reference to the encoding key.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the lifetime of issued tokens.
    #[inline]
    pub fn expires_in(&self) -> Duration {
        Duration::from_secs(self.inner.config.jwt_expires_in_secs)
    }

    /// Returns a reference to the configuration used to create this instance.
    #[inline]
    pub fn config(&self) -> &SessionKeysConfig {
        &self.inner.config
    }

    /// Performs a sign-then-verify round trip with throwaway claims.
    pub fn validate_keys(&self) -> Result<()> {
        use jsonwebtoken::{Header, Validation, decode, encode};

        #[derive(Debug, Serialize, Deserialize)]
        struct ProbeClaims {
            sub: String,
            exp: i64,
        }

        let claims = ProbeClaims {
            sub: "probe".to_owned(),
            exp: jiff::Timestamp::now().as_second() + 300,
        };

        let token = encode(&Header::new(SESSION_ALGORITHM), &claims, self.encoding_key())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "key validation failed during encoding",
                );
                Error::auth("key validation encoding failed").with_source(e)
            })?;

        decode::<ProbeClaims>(
            &token,
            self.decoding_key(),
            &Validation::new(SESSION_ALGORITHM),
        )
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "key validation failed during decoding",
            );
            Error::auth("key validation decoding failed").with_source(e)
        })?;

        tracing::debug!(target: TRACING_TARGET, "key validation successful");
        Ok(())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn keys_round_trip() -> anyhow::Result<()> {
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("s3cr3t"))?;
        keys.validate_keys()?;
        assert_eq!(keys.expires_in(), Duration::from_secs(86_400));
        Ok(())
    }

    #[test]
    fn reject_empty_secret() {
        let err = SessionKeys::from_config(&SessionKeysConfig::new("  ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn reject_zero_lifetime() {
        let config = SessionKeysConfig::new("s3cr3t").with_expires_in_secs(0);
        assert!(SessionKeys::from_config(&config).is_err());
    }

    #[test]
    fn debug_hides_secret() -> anyhow::Result<()> {
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("do-not-print"))?;
        assert!(!format!("{keys:?}").contains("do-not-print"));
        Ok(())
    }
}
