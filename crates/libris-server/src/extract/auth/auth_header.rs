//! Bearer token extraction from the `Authorization` header.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use derive_more::Deref;

use super::AuthClaims;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Authentication scheme accepted in the `Authorization` header.
const BEARER_SCHEME: &str = "Bearer";

/// Verified claims taken from an `Authorization: Bearer <token>` header.
///
/// Only the token is checked here. Use [`AuthState`] when the caller must
/// also still exist in the store.
///
/// [`AuthState`]: super::AuthState
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct AuthHeader {
    #[deref]
    auth_claims: AuthClaims,
}

impl AuthHeader {
    /// Consumes this header and returns the token claims.
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }

    /// Splits a raw header value into its token.
    ///
    /// The value must be exactly the scheme, one space and a non-empty token.
    pub fn parse_bearer(value: &str) -> Result<&str> {
        let mut parts = value.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
            _ => Err(ErrorKind::Unauthorized
                .with_message("bad authorization header")
                .with_resource("authentication")),
        }
    }

    /// Reads and verifies the header of a request.
    pub fn from_parts(parts: &Parts, keys: &SessionKeys) -> Result<Self> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ErrorKind::Unauthorized
                    .with_message("not logged in")
                    .with_resource("authentication")
            })?;

        let value = value.to_str().map_err(|_| {
            ErrorKind::Unauthorized
                .with_message("bad authorization header")
                .with_context("header is not visible ASCII")
                .with_resource("authentication")
        })?;

        let token = Self::parse_bearer(value).inspect_err(|_| {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "authorization header is not a bearer token"
            );
        })?;

        let auth_claims = AuthClaims::verify(token, keys)?;
        Ok(Self { auth_claims })
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        let keys = SessionKeys::from_ref(state);
        let auth_header = Self::from_parts(parts, &keys)?;

        parts.extensions.insert(auth_header.clone());
        Ok(auth_header)
    }
}

impl aide::OperationInput for AuthHeader {}
