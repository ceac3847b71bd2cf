//! HTTP server startup and lifecycle.

use std::future::IntoFuture;
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::{Result, ServerError, shutdown_signal};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a shutdown signal.
pub async fn serve(app: Router, server_config: ServerConfig) -> Result<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|source| {
        let error = ServerError::Bind {
            address: server_addr.to_string(),
            source,
        };

        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %error,
            suggestion = error.suggestion(),
            "failed to bind to address"
        );

        error
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server is bound to all interfaces, ensure firewall rules are configured"
        );
    }

    let start_time = Instant::now();
    let shutdown_timeout = server_config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal(shutdown_timeout).await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    // In-flight requests get `shutdown_timeout` to finish after the signal.
    let drain_deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                uptime_secs = start_time.elapsed().as_secs(),
                "server encountered an error"
            );
            ServerError::Runtime(err)
        })?,
        () = drain_deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "shutdown timeout elapsed, dropping remaining connections"
            );
        }
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        uptime_secs = start_time.elapsed().as_secs(),
        "server shut down gracefully"
    );

    Ok(())
}
