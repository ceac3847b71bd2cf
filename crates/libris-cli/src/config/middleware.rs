//! Middleware configuration for the HTTP server.
//!
//! The sections are defined in `libris-server` and flattened here.

use clap::Args;
use libris_server::middleware::{OpenApiConfig, RecoveryConfig, SecurityConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// CORS, body limit, OpenAPI and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Allowed origins and request size limit.
    #[clap(flatten)]
    pub security: SecurityConfig,

    /// Paths of the OpenAPI document and Scalar UI.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Request timeout.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.security.allowed_origins,
            max_age_secs = self.security.max_age_seconds,
            max_body_size = self.security.max_body_size,
            "security configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout_secs,
            "recovery configuration"
        );
    }
}
