//! Health check response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness report.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// `ok` while the process serves requests.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
}

impl MonitorStatus {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
