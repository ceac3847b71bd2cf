//! Authenticated caller resolved against the store.
//!
//! A valid token is not enough: the user it names must still exist, and the
//! role used for authorization is the one stored now, not the one in the
//! token. Role changes therefore apply on the next request.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use libris_postgres::model::User;
use libris_postgres::types::UserRole;

use super::{AuthClaims, AuthHeader};
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{ServiceStore, SessionKeys, UserStore};

/// Verified token plus the freshly loaded user it refers to.
///
/// Cached in the request extensions, so the store is queried at most once
/// per request even when middleware and handler both extract it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    user: User,
    claims: AuthClaims,
}

impl AuthState {
    /// Resolves the user named by verified claims.
    pub async fn from_claims(claims: AuthClaims, store: &ServiceStore) -> Result<Self> {
        let user = store.find_user_by_id(claims.id).await?.ok_or_else(|| {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = claims.id,
                "token refers to a user that no longer exists"
            );
            ErrorKind::Unauthorized
                .with_message("User does not exist in the database")
                .with_resource("authentication")
        })?;

        if user.role != claims.role {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = user.id,
                token_role = %claims.role,
                stored_role = %user.role,
                "role changed since the token was issued"
            );
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = user.id,
            role = %user.role,
            "request authenticated"
        );

        Ok(Self { user, claims })
    }

    /// Returns the user as currently stored.
    #[inline]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Returns the stored role.
    #[inline]
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Returns the claims of the presented token.
    #[inline]
    pub fn claims(&self) -> &AuthClaims {
        &self.claims
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
    ServiceStore: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let store = ServiceStore::from_ref(state);
        let auth_state = Self::from_claims(auth_header.into_auth_claims(), &store).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl aide::OperationInput for AuthState {}
