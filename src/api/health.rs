//! Backend liveness probe.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Returns true if the backend reports `ok`.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl ApiClient {
    /// Checks that the backend is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health").await
    }
}
