//! Security middleware: CORS, body size limit and response hardening headers.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Origins allowed when none are configured.
const DEVELOPMENT_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// CORS and request size settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityConfig {
    /// Allowed CORS origins. Empty means local development origins.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "cors-allowed-origins", env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight responses in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Largest accepted request body in bytes.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "MAX_BODY_SIZE", default_value = "1048576")
    )]
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            max_body_size: 1024 * 1024,
        }
    }
}

impl SecurityConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to header values, skipping unparsable ones.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return DEVELOPMENT_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, the body size limit, compression and `nosniff`.
    fn with_security(self, config: &SecurityConfig) -> Self;

    /// Layers security middleware with default configuration.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, config: &SecurityConfig) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(config.to_header_values())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(config.max_age());

        self.layer(DefaultBodyLimit::max(config.max_body_size))
            .layer(CompressionLayer::new())
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
    }

    fn with_default_security(self) -> Self {
        self.with_security(&SecurityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum_test::TestServer;

    use super::*;
    use crate::extract::Json;

    async fn echo(Json(value): Json<serde_json::Value>) -> Json<serde_json::Value> {
        Json(value)
    }

    #[test]
    fn configured_origins_replace_defaults() {
        let config = SecurityConfig {
            allowed_origins: vec!["https://libris.example".into(), "bad\norigin".into()],
            ..SecurityConfig::default()
        };
        assert_eq!(config.to_header_values(), vec!["https://libris.example"]);
        assert_eq!(SecurityConfig::default().to_header_values().len(), 4);
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() -> anyhow::Result<()> {
        let config = SecurityConfig {
            max_body_size: 64,
            ..SecurityConfig::default()
        };
        let router = Router::new().route("/", post(echo)).with_security(&config);
        let server = TestServer::new(router)?;

        let small = server.post("/").json(&serde_json::json!({"a": 1})).await;
        small.assert_status_ok();
        assert_eq!(small.header("x-content-type-options"), "nosniff");

        let big = serde_json::json!({ "a": "x".repeat(256) });
        let response = server.post("/").json(&big).await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }
}
