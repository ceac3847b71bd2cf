//! Access control: authentication followed by a rights check.
//!
//! A single middleware covers both steps. Each route group declares when it
//! needs an identity; the request method decides which right is checked.

use aide::axum::ApiRouter;
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::AuthState;
use crate::handler::{ErrorKind, Result};
use crate::service::{Action, RoleRightsExt, ServiceState};

/// When a route group requires an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRequirement {
    /// Every request must be authenticated.
    Always,
    /// Only `POST`, `PUT` and `DELETE` requests must be authenticated.
    MutatingOnly,
}

impl IdentityRequirement {
    /// Returns whether a request performing `action` needs an identity.
    #[must_use]
    pub const fn applies_to(self, action: Option<Action>) -> bool {
        match self {
            Self::Always => true,
            Self::MutatingOnly => action.is_some(),
        }
    }
}

/// State handed to [`enforce_access`].
#[derive(Debug, Clone)]
pub struct AccessGuard {
    state: ServiceState,
    requirement: IdentityRequirement,
}

impl AccessGuard {
    pub fn new(state: ServiceState, requirement: IdentityRequirement) -> Self {
        Self { state, requirement }
    }
}

/// Extension trait for [`ApiRouter`] to guard route groups.
pub trait RouterAccessExt<S> {
    /// Requires an identity per `requirement` and checks the caller's role
    /// against the action implied by the request method.
    ///
    /// Applied as a route layer, so unmatched paths still fall through to 404.
    fn with_access(self, state: ServiceState, requirement: IdentityRequirement) -> Self;
}

impl<S> RouterAccessExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_access(self, state: ServiceState, requirement: IdentityRequirement) -> Self {
        let guard = AccessGuard::new(state, requirement);
        self.route_layer(from_fn_with_state(guard, enforce_access))
    }
}

/// Authenticates the caller when required and enforces role rights.
///
/// The resolved [`AuthState`] is cached in the request extensions for the
/// handler. Requests whose method implies no action pass without a check.
pub async fn enforce_access(
    State(guard): State<AccessGuard>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let action = Action::from_method(request.method());
    if !guard.requirement.applies_to(action) {
        return Ok(next.run(request).await);
    }

    let (mut parts, body) = request.into_parts();
    let auth_state = AuthState::from_request_parts(&mut parts, &guard.state).await?;
    let request = Request::from_parts(parts, body);

    if let Some(action) = action {
        let role = auth_state.role();
        if !role.has_right(action) {
            tracing::warn!(
                target: TRACING_TARGET_AUTHORIZATION,
                user_id = auth_state.user().id,
                role = %role,
                action = %action,
                "access denied"
            );

            return Err(ErrorKind::Forbidden
                .with_resource("authorization")
                .with_context(format!("role {role} lacks the {action} right")));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHORIZATION,
            user_id = auth_state.user().id,
            action = %action,
            "access granted"
        );
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_by_action() {
        assert!(IdentityRequirement::Always.applies_to(None));
        assert!(IdentityRequirement::Always.applies_to(Some(Action::Update)));
        assert!(!IdentityRequirement::MutatingOnly.applies_to(None));
        assert!(IdentityRequirement::MutatingOnly.applies_to(Some(Action::Create)));
        assert!(IdentityRequirement::MutatingOnly.applies_to(Some(Action::Delete)));
    }
}
