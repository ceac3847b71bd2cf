//! User account handlers: registration, login, identity and role changes.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{AuthClaims, AuthState, Json, Path, ValidateJson};
use crate::handler::request::{ChangeRole, LoginUser, RecordPathParams, RegisterUser};
use crate::handler::response::{ErrorResponse, Login, Me, User};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{IdentityRequirement, RouterAccessExt};
use crate::service::{
    CredentialHasher, RegistrationPolicy, ServiceState, ServiceStore, SessionKeys, UserStore,
};

/// Tracing target for user operations.
const TRACING_TARGET: &str = "libris_server::handler::users";

/// Creates a new account with the configured default role.
#[tracing::instrument(skip_all)]
async fn register(
    State(store): State<ServiceStore>,
    State(credential_hasher): State<CredentialHasher>,
    State(registration_policy): State<RegistrationPolicy>,
    ValidateJson(request): ValidateJson<RegisterUser>,
) -> Result<(StatusCode, Json<User>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = ?request.username,
        "registration attempt"
    );

    let new_user = request.into_model(&credential_hasher, registration_policy.default_role)?;
    let user = store.create_user(new_user).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        "user registered"
    );

    Ok((StatusCode::CREATED, Json(User::from_model(user))))
}

fn register_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register")
        .description("Creates an account. New accounts receive the configured default role.")
        .response::<201, Json<User>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Exchanges credentials for a signed identity token.
#[tracing::instrument(skip_all)]
async fn login(
    State(store): State<ServiceStore>,
    State(credential_hasher): State<CredentialHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<LoginUser>,
) -> Result<(StatusCode, Json<Login>)> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    tracing::trace!(target: TRACING_TARGET, username = %username, "login attempt");

    let user = store.find_user_by_username(&username).await?;
    let user = match user {
        Some(user) if credential_hasher.verify(&password, &user.password_hash) => user,
        user => {
            tracing::warn!(
                target: TRACING_TARGET,
                username = %username,
                user_exists = user.is_some(),
                "login failed"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Wrong username or password")
                .with_resource("authentication"));
        }
    };

    let (claims, token) = AuthClaims::issue(&user, &session_keys)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        expires_at = %claims.expires_at,
        "login successful: token issued"
    );

    Ok((StatusCode::OK, Json(Login::new(token))))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description("Verifies the credentials and returns a bearer token valid for one day.")
        .response::<200, Json<Login>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns the caller as currently stored.
#[tracing::instrument(skip_all, fields(user_id = auth_state.user().id))]
async fn me(auth_state: AuthState) -> Result<(StatusCode, Json<Me>)> {
    tracing::trace!(target: TRACING_TARGET, "identity requested");

    let expires_at = auth_state.claims().expires_at;
    let response = Me::new(auth_state.user().clone(), expires_at);
    Ok((StatusCode::OK, Json(response)))
}

fn me_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Current user")
        .description("Returns the stored account of the caller and the token expiry.")
        .response::<200, Json<Me>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Changes the role of any user.
#[tracing::instrument(skip_all, fields(caller_id = auth_state.user().id))]
async fn change_role(
    State(store): State<ServiceStore>,
    auth_state: AuthState,
    Path(path_params): Path<RecordPathParams>,
    ValidateJson(request): ValidateJson<ChangeRole>,
) -> Result<(StatusCode, Json<User>)> {
    let user_id = path_params.id()?;
    let role = request.role()?;

    tracing::trace!(
        target: TRACING_TARGET,
        user_id = user_id,
        role = %role,
        "changing role"
    );

    let Some(user) = store.update_user_role(user_id, role).await? else {
        return Err(ErrorKind::NotFound
            .with_message("User with specified id was not found")
            .with_resource("users")
            .with_context(format!("id: {user_id}")));
    };

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        role = %user.role,
        changed_by = auth_state.user().id,
        "role changed"
    );

    Ok((StatusCode::OK, Json(User::from_model(user))))
}

fn change_role_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Change role")
        .description("Sets the role of a user. Requires the UPDATE right. Takes effect on the user's next request.")
        .response::<200, Json<User>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes(state: ServiceState) -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    let public = ApiRouter::new()
        .api_route("/users/register", post_with(register, register_docs))
        .api_route("/users/login", post_with(login, login_docs));

    let protected = ApiRouter::new()
        .api_route("/users/me", get_with(me, me_docs))
        .api_route("/users/{id}/role", put_with(change_role, change_role_docs))
        .with_access(state, IdentityRequirement::Always);

    public
        .merge(protected)
        .with_path_items(|item| item.tag("Users"))
}
