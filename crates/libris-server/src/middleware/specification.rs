//! OpenAPI document generation with a Scalar UI.

use aide::axum::ApiRouter;
use aide::openapi::{Info, License, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths where the OpenAPI document and its UI are served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON document.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the API with the default document info and serves it.
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S>;

    /// Finishes the API with custom document info and serves it.
    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Libris API".to_owned(),
            summary: Some("Users and books with role-based access".to_owned()),
            description: Some(
                "Register and log in to obtain a bearer token. Readers may browse the \
                catalog; administrators may also add, replace and remove books and \
                change user roles."
                    .to_owned(),
            ),
            license: Some(License {
                name: "MIT".to_owned(),
                identifier: Some("MIT".to_owned()),
                ..License::default()
            }),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::handler::test::create_test_state;
    use crate::service::MemoryStore;

    #[tokio::test]
    async fn document_lists_every_route() -> anyhow::Result<()> {
        let state = create_test_state(MemoryStore::new());
        let app = routes(state.clone())
            .with_open_api(&OpenApiConfig::default())
            .with_state(state);
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let document = response.json::<serde_json::Value>();
        let paths = &document["paths"];
        for path in [
            "/health",
            "/users/register",
            "/users/login",
            "/users/me",
            "/users/{id}/role",
            "/books",
            "/books/{id}",
        ] {
            assert!(paths.get(path).is_some(), "{path} is not documented");
        }

        let book = &paths["/books/{id}"];
        for method in ["get", "put", "delete"] {
            assert!(book.get(method).is_some(), "{method} /books/{{id}}");
        }
        Ok(())
    }
}
