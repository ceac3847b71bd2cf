//! Liveness endpoint.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "libris_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status() -> Result<(StatusCode, Json<MonitorStatus>)> {
    tracing::trace!(target: TRACING_TARGET, "health check");
    Ok((StatusCode::OK, Json(MonitorStatus::healthy())))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health")
        .description("Reports that the process is serving requests.")
        .response::<200, Json<MonitorStatus>>()
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
