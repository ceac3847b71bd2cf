//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, body limit, OpenAPI, timeouts
//! └── service: ServiceConfig        # Postgres, token keys, default role
//! ```
//!
//! Every option can be given as an argument or an environment variable.
//!
//! ```bash
//! libris --jwt-secret s3cr3t --port 8080
//! JWT_SECRET=s3cr3t PORT=8080 libris
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use libris_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "libris")]
#[command(about = "Libris catalog server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Store, token and registration configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads `.env` (if enabled) and parses CLI arguments.
    ///
    /// The file is loaded first so clap can read its values as environment
    /// variables.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// `RUST_LOG` overrides the default `info` level.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "starting libris server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .session_keys_config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid session configuration: {e}"))?;
        Ok(())
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            in_memory = self.service.in_memory,
            default_user_role = %self.service.default_user_role,
            jwt_expires_in_secs = self.service.session_keys_config.jwt_expires_in_secs,
            "service configuration"
        );

        if !self.service.in_memory {
            tracing::info!(
                target: TRACING_TARGET_CONFIG,
                postgres_max_connections = self.service.postgres_config.postgres_max_connections,
                postgres_connection_timeout_secs = ?self.service.postgres_config.postgres_connection_timeout_secs,
                "database configuration"
            );
        }
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
