//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! | Method | Path               | Identity | Right  |
//! |--------|--------------------|----------|--------|
//! | POST   | `/users/register`  | no       |        |
//! | POST   | `/users/login`     | no       |        |
//! | GET    | `/users/me`        | yes      |        |
//! | PUT    | `/users/{id}/role` | yes      | UPDATE |
//! | POST   | `/books`           | yes      | CREATE |
//! | GET    | `/books`           | no       |        |
//! | GET    | `/books/{id}`      | no       |        |
//! | PUT    | `/books/{id}`      | yes      | UPDATE |
//! | DELETE | `/books/{id}`      | yes      | DELETE |
//! | GET    | `/health`          | no       |        |
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod books;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod users;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes and their access rules.
pub fn routes(state: ServiceState) -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(users::routes(state.clone()))
        .merge(books::routes(state))
        .merge(monitors::routes())
        .fallback(fallback)
}

#[cfg(test)]
pub(crate) mod test {
    use axum::Router;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use libris_postgres::types::UserRole;
    use serde_json::json;

    use crate::handler::response::{Login, User};
    use crate::handler::routes;
    use crate::service::{
        MemoryStore, ServiceState, ServiceStore, SessionKeys, SessionKeysConfig, UserStore,
    };

    /// Returns signing keys for tests.
    pub fn test_keys() -> SessionKeys {
        SessionKeys::from_config(&SessionKeysConfig::new("libris-test-secret"))
            .expect("test keys")
    }

    /// Returns a state over `store` with test keys.
    pub fn create_test_state(store: MemoryStore) -> ServiceState {
        ServiceState::with_store(ServiceStore::new(store), test_keys())
    }

    /// Returns a new [`TestServer`] with the full router over `state`.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app: Router = routes(state.clone()).with_state(state).into();
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] over an empty in-memory store.
    pub fn create_test_server() -> anyhow::Result<(TestServer, ServiceState)> {
        let state = create_test_state(MemoryStore::new());
        let server = create_test_server_with_state(state.clone())?;
        Ok((server, state))
    }

    /// Registers `username` with password `secret`.
    pub async fn register(server: &TestServer, username: &str) -> User {
        let response = server
            .post("/users/register")
            .json(&json!({
                "username": username,
                "password": "secret",
                "email": format!("{username}@example.com"),
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<User>()
    }

    /// Logs `username` in with password `secret` and returns the token.
    pub async fn login(server: &TestServer, username: &str) -> String {
        let response = server
            .post("/users/login")
            .json(&json!({ "username": username, "password": "secret" }))
            .await;
        response.assert_status_ok();
        response.json::<Login>().token
    }

    /// Registers a user, sets its role and returns it with a fresh token.
    pub async fn signed_in(
        server: &TestServer,
        state: &ServiceState,
        username: &str,
        role: UserRole,
    ) -> anyhow::Result<(User, String)> {
        let user = register(server, username).await;
        if role != user.role {
            state.store().update_user_role(user.id, role).await?;
        }
        let token = login(server, username).await;
        Ok((user, token))
    }

    /// Formats an `Authorization` header value.
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/nowhere").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<serde_json::Value>()["name"], "not_found");
        Ok(())
    }
}
