//! Identity token claims: issuing and verification.

use std::time::Duration;

use jiff::Timestamp;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Header, Validation, decode, encode};
use libris_postgres::model::User;
use libris_postgres::types::UserRole;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};
use crate::service::{SESSION_ALGORITHM, SessionKeys};

/// Why a token could not be issued or verified.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is past its `exp` claim.
    #[error("jwt expired")]
    Expired,
    /// The signature does not match the shared secret.
    #[error("invalid signature")]
    InvalidSignature,
    /// The token is not three base64 segments.
    #[error("jwt malformed")]
    Malformed,
    /// Anything else: bad claims, wrong subject, undecodable payload.
    #[error("invalid token")]
    Invalid,
    /// The expiry could not be computed.
    #[error("token lifetime out of range")]
    Lifetime(#[from] jiff::Error),
    /// Encoding the token failed.
    #[error("token signing failed")]
    Signing(#[source] JwtError),
}

impl From<JwtError> for TokenError {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            JwtErrorKind::InvalidToken => Self::Malformed,
            _ => Self::Invalid,
        }
    }
}

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Lifetime(_) | TokenError::Signing(_) => {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %error,
                    "failed to issue identity token"
                );
                ErrorKind::InternalServerError
                    .with_context(error.to_string())
                    .with_resource("authentication")
            }
            rejected => ErrorKind::Unauthorized
                .with_message(rejected.to_string())
                .with_resource("authentication"),
        }
    }
}

/// Claims carried by every identity token.
///
/// The role is informational only; authorization always re-reads it from
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthClaims {
    /// User identifier.
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Role at the time the token was issued.
    pub role: UserRole,

    /// Fixed subject, always [`AuthClaims::SUBJECT`].
    pub sub: String,
    /// Issued at (unix seconds).
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expiration time (unix seconds).
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl AuthClaims {
    /// Subject claim of every identity token.
    pub const SUBJECT: &str = "userInfo";

    /// Builds claims for `user` valid for `lifetime` starting at `issued_at`.
    pub fn new(user: &User, issued_at: Timestamp, lifetime: Duration) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add(lifetime)?;

        Ok(Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            sub: Self::SUBJECT.to_owned(),
            issued_at,
            expires_at,
        })
    }

    /// Issues a signed token for `user` that expires after the configured lifetime.
    pub fn issue(user: &User, keys: &SessionKeys) -> Result<(Self, String), TokenError> {
        Self::issue_at(user, Timestamp::now(), keys)
    }

    /// Issues a signed token as if the current time were `now`.
    pub fn issue_at(
        user: &User,
        now: Timestamp,
        keys: &SessionKeys,
    ) -> Result<(Self, String), TokenError> {
        let claims = Self::new(user, now, keys.expires_in())?;
        let token = claims.encode(keys)?;
        Ok((claims, token))
    }

    /// Signs the claims.
    pub fn encode(&self, keys: &SessionKeys) -> Result<String, TokenError> {
        let header = Header::new(SESSION_ALGORITHM);
        encode(&header, self, keys.encoding_key()).map_err(TokenError::Signing)
    }

    /// Verifies a token's signature, expiry and subject and returns its claims.
    pub fn verify(token: &str, keys: &SessionKeys) -> Result<Self, TokenError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.sub = Some(Self::SUBJECT.to_owned());

        let token_data = decode::<Self>(token, keys.decoding_key(), &validation).map_err(|e| {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                "identity token rejected"
            );
            TokenError::from(e)
        })?;

        Ok(token_data.claims)
    }
}
